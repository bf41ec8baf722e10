use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/book", post(handlers::booking::book_slot))
        .route("/getallbookings", get(handlers::booking::get_all_bookings))
        .route(
            "/updatetheBooking/:id",
            put(handlers::booking::update_booking),
        )
        .route(
            "/deletetheBooking/:id",
            delete(handlers::booking::delete_booking),
        )
}
