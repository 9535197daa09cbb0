//! Application service layer.
//!
//! Services hold the request pipeline and sit between the HTTP server and
//! the email provider client.

mod dispatch_service;

pub use dispatch_service::{
    DispatchResponse, MailDispatchService, MailDispatchServiceImpl, SUCCESS_MESSAGE,
};
