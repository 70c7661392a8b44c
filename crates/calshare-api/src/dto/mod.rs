//! Request and response data transfer objects.

pub mod request;
pub mod response;

pub use request::{
    CreateCalendarRequest, CreateShareLinkRequest, EventRequest, UpdateCalendarRequest,
    UpdateShareLinkRequest, VerifyPasswordRequest,
};
pub use response::{
    ApiResponse, CreatedShareLinkResponse, DeletedResponse, HealthResponse, SharedEventsResponse,
};
