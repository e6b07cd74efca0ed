mod contact;
mod homestay;
mod listing;
mod manager;

use abi::{
    Availability, ContactInfo, ContactInfoForm, ContactMessage, DateRange, Error, Facility,
    Homestay, HomestayFilter, HomestayForm, Listing, ListingKind, MessageId, MessageStatus,
    NewContactMessage, NewReservation, Page, Reservation, ReservationFilter, ReservationId,
    ReservationStatus,
};
use async_trait::async_trait;
use sqlx::PgPool;

#[derive(Debug, Clone)]
pub struct BookingManager {
    pool: PgPool,
}

#[async_trait]
pub trait Rsvp {
    /// check whether no requested/confirmed reservation of the homestay overlaps `range`
    async fn check_availability(&self, slug: &str, range: DateRange)
        -> Result<Availability, Error>;
    /// request a stay; the new reservation starts as `requested`
    async fn reserve(&self, slug: &str, rsvp: NewReservation) -> Result<Reservation, Error>;
    /// move a reservation along its lifecycle
    async fn change_status(
        &self,
        id: ReservationId,
        status: ReservationStatus,
    ) -> Result<Reservation, Error>;
    /// get a reservation by id
    async fn get(&self, id: ReservationId) -> Result<Reservation, Error>;
    /// query reservations, ordered by reservation id
    async fn query(&self, filter: ReservationFilter) -> Result<Page<Reservation>, Error>;
}

#[async_trait]
pub trait HomestayStore {
    async fn list_homestays(&self, filter: HomestayFilter) -> Result<Vec<Homestay>, Error>;
    async fn homestay(&self, slug: &str) -> Result<Homestay, Error>;
    async fn create_homestay(&self, form: HomestayForm) -> Result<Homestay, Error>;
    /// replace the editable fields; a form without slug keeps the current one
    async fn update_homestay(&self, slug: &str, form: HomestayForm) -> Result<Homestay, Error>;
    /// delete a homestay together with its reservations
    async fn delete_homestay(&self, slug: &str) -> Result<(), Error>;
    /// every facility offered, with the number of homestays offering it;
    /// names differing only in case count as one facility
    async fn facilities(&self) -> Result<Vec<Facility>, Error>;
}

#[async_trait]
pub trait Inbox {
    async fn contact_info(&self) -> Result<ContactInfo, Error>;
    async fn update_contact_info(&self, form: ContactInfoForm) -> Result<ContactInfo, Error>;
    async fn submit_message(&self, msg: NewContactMessage) -> Result<ContactMessage, Error>;
    /// newest first, optionally only one status
    async fn messages(&self, status: Option<MessageStatus>) -> Result<Vec<ContactMessage>, Error>;
    async fn set_message_status(
        &self,
        id: MessageId,
        status: MessageStatus,
    ) -> Result<ContactMessage, Error>;
    async fn delete_message(&self, id: MessageId) -> Result<(), Error>;
}

#[async_trait]
pub trait Listings {
    async fn listings(&self, kind: ListingKind) -> Result<Vec<Listing>, Error>;
}

/// Everything the web service needs from storage.
pub trait Store: Rsvp + HomestayStore + Inbox + Listings + Send + Sync {}

impl<T> Store for T where T: Rsvp + HomestayStore + Inbox + Listings + Send + Sync {}
