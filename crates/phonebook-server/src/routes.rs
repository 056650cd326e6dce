use crate::handlers::{create_address, fetch_address, remove_address, update_address};
use axum::routing::get;
use axum::Router;
use phonebook_store::Store;

pub fn router(store: Store, endpoint_prefix: &str) -> Router {
    Router::new()
        .route(
            endpoint_prefix,
            get(fetch_address)
                .post(create_address)
                .put(update_address)
                .delete(remove_address),
        )
        .with_state(store)
}
