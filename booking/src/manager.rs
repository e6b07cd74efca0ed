use crate::{BookingManager, HomestayStore, Rsvp};
use abi::{
    Availability, DateRange, DbConfig, Error, NewReservation, Normalizer, Page, Reservation,
    ReservationFilter, ReservationId, ReservationStatus,
};
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool, Postgres, QueryBuilder};
use tracing::{info, warn};

pub(crate) const RESERVATION_COLUMNS: &str = "id, homestay_id, guest_name, guest_email, guests, \
     check_in, check_out, note, status::TEXT AS status, created_at";

#[async_trait]
impl Rsvp for BookingManager {
    async fn check_availability(
        &self,
        slug: &str,
        range: DateRange,
    ) -> Result<Availability, Error> {
        let blocking = blocking_statuses();

        // half-open overlap: existing.check_in < new.check_out AND existing.check_out > new.check_in
        let row: Option<(i64, bool)> = sqlx::query_as(
            r#"
            SELECT h.id, NOT EXISTS (
                SELECT 1 FROM stay.reservations r
                WHERE r.homestay_id = h.id
                  AND r.status::TEXT = ANY($2)
                  AND r.check_in < $4
                  AND r.check_out > $3
            )
            FROM stay.homestays h
            WHERE h.slug = $1
            "#,
        )
        .bind(slug)
        .bind(blocking)
        .bind(range.check_in)
        .bind(range.check_out)
        .fetch_optional(&self.pool)
        .await?;

        let (homestay_id, available) = row.ok_or(Error::NotFound)?;
        Ok(Availability::new(homestay_id, range, available))
    }

    async fn reserve(&self, slug: &str, mut rsvp: NewReservation) -> Result<Reservation, Error> {
        rsvp.normalize()?;
        let homestay = self.homestay(slug).await?;
        if rsvp.guests > homestay.max_guests {
            return Err(Error::InvalidGuests(rsvp.guests));
        }

        // overlapping blocking stays are rejected by the reservations_conflict constraint
        let sql = format!(
            "INSERT INTO stay.reservations (homestay_id, guest_name, guest_email, guests, check_in, check_out, note) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
            RESERVATION_COLUMNS
        );
        let reservation: Reservation = sqlx::query_as(&sql)
            .bind(homestay.id)
            .bind(&rsvp.guest_name)
            .bind(&rsvp.guest_email)
            .bind(rsvp.guests)
            .bind(rsvp.check_in)
            .bind(rsvp.check_out)
            .bind(&rsvp.note)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                let err = Error::from(e);
                if let Error::ConflictReservation(info) = &err {
                    warn!(homestay = slug, %info, "reservation rejected");
                }
                err
            })?;

        info!(
            id = reservation.id,
            homestay = slug,
            check_in = %reservation.check_in,
            check_out = %reservation.check_out,
            nights = reservation.range().nights(),
            "reservation requested"
        );
        Ok(reservation)
    }

    async fn change_status(
        &self,
        id: ReservationId,
        status: ReservationStatus,
    ) -> Result<Reservation, Error> {
        let sources: Vec<String> = ReservationStatus::sources_of(status)
            .iter()
            .map(ToString::to_string)
            .collect();

        let sql = format!(
            "UPDATE stay.reservations SET status = $2::stay.reservation_status \
             WHERE id = $1 AND status::TEXT = ANY($3) RETURNING {}",
            RESERVATION_COLUMNS
        );
        let updated: Option<Reservation> = sqlx::query_as(&sql)
            .bind(id)
            .bind(status.as_str())
            .bind(sources)
            .fetch_optional(&self.pool)
            .await?;

        match updated {
            Some(rsvp) => {
                info!(id, %status, "reservation status changed");
                Ok(rsvp)
            }
            None => {
                let current = self.get(id).await?;
                Err(Error::InvalidTransition {
                    from: current.status,
                    to: status,
                })
            }
        }
    }

    async fn get(&self, id: ReservationId) -> Result<Reservation, Error> {
        let sql = format!(
            "SELECT {} FROM stay.reservations WHERE id = $1",
            RESERVATION_COLUMNS
        );
        let rsvp = sqlx::query_as(&sql).bind(id).fetch_one(&self.pool).await?;
        Ok(rsvp)
    }

    async fn query(&self, filter: ReservationFilter) -> Result<Page<Reservation>, Error> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        builder
            .push(RESERVATION_COLUMNS)
            .push(" FROM stay.reservations WHERE id ")
            .push(if filter.desc { "< " } else { "> " })
            .push_bind(filter.get_cursor());
        if !filter.homestay.is_empty() {
            builder
                .push(" AND homestay_id = (SELECT id FROM stay.homestays WHERE slug = ")
                .push_bind(filter.homestay.clone())
                .push(")");
        }
        if let Some(status) = filter.status {
            builder
                .push(" AND status::TEXT = ")
                .push_bind(status.as_str());
        }
        builder
            .push(" ORDER BY id ")
            .push(if filter.desc { "DESC" } else { "ASC" })
            .push(" LIMIT ")
            .push_bind(filter.limit());

        let rows = builder
            .build_query_as::<Reservation>()
            .fetch_all(&self.pool)
            .await?;
        Ok(Page::new(rows, filter.page_size))
    }
}

fn blocking_statuses() -> Vec<String> {
    ReservationStatus::BLOCKING
        .iter()
        .map(ToString::to_string)
        .collect()
}

impl BookingManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn from_config(config: &DbConfig) -> Result<Self, Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url())
            .await?;
        Ok(Self::new(pool))
    }
}
