//! HTTP-level integration tests over in-memory stores.

mod helpers;

mod calendar_test;
mod event_test;
mod permission_test;
mod share_test;
