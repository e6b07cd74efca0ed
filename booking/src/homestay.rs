use abi::{Error, Facility, Homestay, HomestayFilter, HomestayForm, Normalizer};
use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use tracing::info;

use crate::{BookingManager, HomestayStore};

const HOMESTAY_COLUMNS: &str = "id, slug, name, description, location, price_per_night, \
     max_guests, facilities, images, created_at, updated_at";

#[async_trait]
impl HomestayStore for BookingManager {
    async fn list_homestays(&self, filter: HomestayFilter) -> Result<Vec<Homestay>, Error> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        builder
            .push(HOMESTAY_COLUMNS)
            .push(" FROM stay.homestays WHERE TRUE");
        if let Some(pattern) = filter.pattern() {
            builder
                .push(" AND (name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR location ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        if let Some(max_price) = filter.max_price {
            builder
                .push(" AND price_per_night <= ")
                .push_bind(max_price);
        }
        builder.push(" ORDER BY name ASC, id ASC");

        let homestays = builder
            .build_query_as::<Homestay>()
            .fetch_all(&self.pool)
            .await?;
        Ok(homestays)
    }

    async fn homestay(&self, slug: &str) -> Result<Homestay, Error> {
        let sql = format!(
            "SELECT {} FROM stay.homestays WHERE slug = $1",
            HOMESTAY_COLUMNS
        );
        let homestay = sqlx::query_as(&sql).bind(slug).fetch_one(&self.pool).await?;
        Ok(homestay)
    }

    async fn create_homestay(&self, mut form: HomestayForm) -> Result<Homestay, Error> {
        form.normalize()?;
        let sql = format!(
            "INSERT INTO stay.homestays (slug, name, description, location, price_per_night, max_guests, facilities, images) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {}",
            HOMESTAY_COLUMNS
        );
        let homestay: Homestay = sqlx::query_as(&sql)
            .bind(form.slug())
            .bind(&form.name)
            .bind(&form.description)
            .bind(&form.location)
            .bind(form.price_per_night)
            .bind(form.max_guests)
            .bind(&form.facilities)
            .bind(&form.images)
            .fetch_one(&self.pool)
            .await?;
        info!(id = homestay.id, slug = %homestay.slug, "homestay created");
        Ok(homestay)
    }

    async fn update_homestay(&self, slug: &str, mut form: HomestayForm) -> Result<Homestay, Error> {
        if form.slug.as_deref().map_or(true, |s| s.trim().is_empty()) {
            form.slug = Some(slug.to_string());
        }
        form.normalize()?;
        let sql = format!(
            "UPDATE stay.homestays SET slug = $1, name = $2, description = $3, location = $4, \
             price_per_night = $5, max_guests = $6, facilities = $7, images = $8, updated_at = now() \
             WHERE slug = $9 RETURNING {}",
            HOMESTAY_COLUMNS
        );
        let homestay: Homestay = sqlx::query_as(&sql)
            .bind(form.slug())
            .bind(&form.name)
            .bind(&form.description)
            .bind(&form.location)
            .bind(form.price_per_night)
            .bind(form.max_guests)
            .bind(&form.facilities)
            .bind(&form.images)
            .bind(slug)
            .fetch_one(&self.pool)
            .await?;
        info!(id = homestay.id, slug = %homestay.slug, "homestay updated");
        Ok(homestay)
    }

    async fn delete_homestay(&self, slug: &str) -> Result<(), Error> {
        let ret = sqlx::query("DELETE FROM stay.homestays WHERE slug = $1")
            .bind(slug)
            .execute(&self.pool)
            .await?;
        if ret.rows_affected() == 0 {
            return Err(Error::NotFound);
        }
        info!(slug, "homestay deleted");
        Ok(())
    }

    async fn facilities(&self) -> Result<Vec<Facility>, Error> {
        let facilities = sqlx::query_as(
            r#"
            SELECT min(f.name) AS name, COUNT(DISTINCT h.id) AS homestays
            FROM stay.homestays h, unnest(h.facilities) AS f(name)
            GROUP BY lower(f.name)
            ORDER BY homestays DESC, lower(min(f.name)) ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(facilities)
    }
}
