use abi::{Error, Listing, ListingKind};
use async_trait::async_trait;

use crate::{BookingManager, Listings};

#[async_trait]
impl Listings for BookingManager {
    async fn listings(&self, kind: ListingKind) -> Result<Vec<Listing>, Error> {
        let listings = sqlx::query_as(
            "SELECT id, kind::TEXT AS kind, name, description, location, image_url \
             FROM stay.listings WHERE kind::TEXT = $1 ORDER BY name ASC",
        )
        .bind(kind.as_str())
        .fetch_all(&self.pool)
        .await?;
        Ok(listings)
    }
}
