#![allow(dead_code)]

use std::sync::Mutex;

use abi::{
    AuthConfig, Availability, ContactInfo, ContactInfoForm, ContactMessage, DateRange, Error,
    Facility, Homestay, HomestayFilter, HomestayForm, Listing, ListingKind, MessageId,
    MessageStatus, NewContactMessage, NewReservation, Normalizer, Page, Reservation,
    ReservationConflict, ReservationConflictInfo, ReservationFilter, ReservationId,
    ReservationStatus, ReservationWindow,
};
use async_trait::async_trait;
use booking::{HomestayStore, Inbox, Listings, Rsvp};
use chrono::Utc;

use crate::AppState;

pub const ADMIN_TOKEN: &str = "test-admin-token";

/// In-memory stand-in for `BookingManager`, good enough to drive the router.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    homestays: Vec<Homestay>,
    reservations: Vec<Reservation>,
    listings: Vec<Listing>,
    contact: Option<ContactInfo>,
    messages: Vec<ContactMessage>,
    next_id: i64,
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn homestay(&self, slug: &str) -> Result<&Homestay, Error> {
        self.homestays
            .iter()
            .find(|h| h.slug == slug)
            .ok_or(Error::NotFound)
    }
}

/// state with one homestay `villa-merapi` holding a confirmed stay 2024-06-10 -> 2024-06-15
pub fn test_state() -> AppState {
    let store = MemoryStore::default();
    {
        let mut inner = store.inner.lock().unwrap();
        let id = inner.next_id();
        let now = Utc::now();
        inner.homestays.push(Homestay {
            id,
            slug: "villa-merapi".into(),
            name: "Villa Merapi".into(),
            description: "Wooden villa facing Mount Merapi".into(),
            location: "Kaliurang, Yogyakarta".into(),
            price_per_night: 450_000,
            max_guests: 4,
            facilities: vec!["WiFi".into(), "Parking".into()],
            images: vec![],
            created_at: now,
            updated_at: now,
        });
        let rsvp_id = inner.next_id();
        inner.reservations.push(Reservation {
            id: rsvp_id,
            homestay_id: id,
            guest_name: "Sari".into(),
            guest_email: "sari@example.com".into(),
            guests: 2,
            check_in: "2024-06-10".parse().unwrap(),
            check_out: "2024-06-15".parse().unwrap(),
            note: String::new(),
            status: ReservationStatus::Confirmed,
            created_at: now,
        });
        let listing_id = inner.next_id();
        inner.listings.push(Listing {
            id: listing_id,
            kind: ListingKind::Attraction,
            name: "Tebing Breksi".into(),
            description: String::new(),
            location: "Sleman".into(),
            image_url: String::new(),
        });
        let listing_id = inner.next_id();
        inner.listings.push(Listing {
            id: listing_id,
            kind: ListingKind::Culinary,
            name: "Gudeg Yu Djum".into(),
            description: String::new(),
            location: "Yogyakarta".into(),
            image_url: String::new(),
        });
    }
    AppState::new(
        store,
        &AuthConfig {
            admin_token: ADMIN_TOKEN.into(),
        },
    )
}

#[async_trait]
impl Rsvp for MemoryStore {
    async fn check_availability(
        &self,
        slug: &str,
        range: DateRange,
    ) -> Result<Availability, Error> {
        let inner = self.inner.lock().unwrap();
        let homestay = inner.homestay(slug)?;
        let available = !inner
            .reservations
            .iter()
            .any(|r| r.homestay_id == homestay.id && r.blocks(&range));
        Ok(Availability::new(homestay.id, range, available))
    }

    async fn reserve(&self, slug: &str, mut rsvp: NewReservation) -> Result<Reservation, Error> {
        rsvp.normalize()?;
        let range = rsvp.range()?;
        let mut inner = self.inner.lock().unwrap();
        let homestay = inner.homestay(slug)?.clone();
        if rsvp.guests > homestay.max_guests {
            return Err(Error::InvalidGuests(rsvp.guests));
        }
        if let Some(old) = inner
            .reservations
            .iter()
            .find(|r| r.homestay_id == homestay.id && r.blocks(&range))
        {
            return Err(Error::ConflictReservation(ReservationConflictInfo::Parsed(
                ReservationConflict {
                    new: ReservationWindow {
                        homestay_id: homestay.id,
                        range,
                    },
                    old: ReservationWindow {
                        homestay_id: homestay.id,
                        range: old.range(),
                    },
                },
            )));
        }
        let reservation = Reservation {
            id: inner.next_id(),
            homestay_id: homestay.id,
            guest_name: rsvp.guest_name,
            guest_email: rsvp.guest_email,
            guests: rsvp.guests,
            check_in: rsvp.check_in,
            check_out: rsvp.check_out,
            note: rsvp.note,
            status: ReservationStatus::Requested,
            created_at: Utc::now(),
        };
        inner.reservations.push(reservation.clone());
        Ok(reservation)
    }

    async fn change_status(
        &self,
        id: ReservationId,
        status: ReservationStatus,
    ) -> Result<Reservation, Error> {
        let mut inner = self.inner.lock().unwrap();
        let rsvp = inner
            .reservations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(Error::NotFound)?;
        if !rsvp.status.can_transition_to(status) {
            return Err(Error::InvalidTransition {
                from: rsvp.status,
                to: status,
            });
        }
        rsvp.status = status;
        Ok(rsvp.clone())
    }

    async fn get(&self, id: ReservationId) -> Result<Reservation, Error> {
        let inner = self.inner.lock().unwrap();
        inner
            .reservations
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    async fn query(&self, filter: ReservationFilter) -> Result<Page<Reservation>, Error> {
        let inner = self.inner.lock().unwrap();
        let homestay_id = match filter.homestay.as_str() {
            "" => None,
            slug => Some(inner.homestay(slug).map(|h| h.id).unwrap_or(-1)),
        };
        let cursor = filter.get_cursor();
        let mut rows: Vec<Reservation> = inner
            .reservations
            .iter()
            .filter(|r| if filter.desc { r.id < cursor } else { r.id > cursor })
            .filter(|r| homestay_id.map_or(true, |id| r.homestay_id == id))
            .filter(|r| filter.status.map_or(true, |s| r.status == s))
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.id);
        if filter.desc {
            rows.reverse();
        }
        rows.truncate(filter.limit() as usize);
        Ok(Page::new(rows, filter.page_size))
    }
}

#[async_trait]
impl HomestayStore for MemoryStore {
    async fn list_homestays(&self, filter: HomestayFilter) -> Result<Vec<Homestay>, Error> {
        let inner = self.inner.lock().unwrap();
        let q = filter.q.as_deref().map(str::to_lowercase);
        let mut homestays: Vec<Homestay> = inner
            .homestays
            .iter()
            .filter(|h| {
                q.as_deref().map_or(true, |q| {
                    h.name.to_lowercase().contains(q) || h.location.to_lowercase().contains(q)
                })
            })
            .filter(|h| filter.max_price.map_or(true, |p| h.price_per_night <= p))
            .cloned()
            .collect();
        homestays.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(homestays)
    }

    async fn homestay(&self, slug: &str) -> Result<Homestay, Error> {
        let inner = self.inner.lock().unwrap();
        inner.homestay(slug).cloned()
    }

    async fn create_homestay(&self, mut form: HomestayForm) -> Result<Homestay, Error> {
        form.normalize()?;
        let mut inner = self.inner.lock().unwrap();
        if inner.homestay(form.slug()).is_ok() {
            return Err(Error::AlreadyExists("homestay slug".into()));
        }
        let now = Utc::now();
        let homestay = Homestay {
            id: inner.next_id(),
            slug: form.slug().to_string(),
            name: form.name,
            description: form.description,
            location: form.location,
            price_per_night: form.price_per_night,
            max_guests: form.max_guests,
            facilities: form.facilities,
            images: form.images,
            created_at: now,
            updated_at: now,
        };
        inner.homestays.push(homestay.clone());
        Ok(homestay)
    }

    async fn update_homestay(&self, slug: &str, mut form: HomestayForm) -> Result<Homestay, Error> {
        if form.slug.as_deref().map_or(true, |s| s.trim().is_empty()) {
            form.slug = Some(slug.to_string());
        }
        form.normalize()?;
        let mut inner = self.inner.lock().unwrap();
        if form.slug() != slug && inner.homestay(form.slug()).is_ok() {
            return Err(Error::AlreadyExists("homestay slug".into()));
        }
        let homestay = inner
            .homestays
            .iter_mut()
            .find(|h| h.slug == slug)
            .ok_or(Error::NotFound)?;
        homestay.slug = form.slug().to_string();
        homestay.name = form.name;
        homestay.description = form.description;
        homestay.location = form.location;
        homestay.price_per_night = form.price_per_night;
        homestay.max_guests = form.max_guests;
        homestay.facilities = form.facilities;
        homestay.images = form.images;
        homestay.updated_at = Utc::now();
        Ok(homestay.clone())
    }

    async fn delete_homestay(&self, slug: &str) -> Result<(), Error> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.homestay(slug)?.id;
        inner.homestays.retain(|h| h.id != id);
        inner.reservations.retain(|r| r.homestay_id != id);
        Ok(())
    }

    async fn facilities(&self) -> Result<Vec<Facility>, Error> {
        let inner = self.inner.lock().unwrap();
        let mut facilities: Vec<Facility> = Vec::new();
        for name in inner.homestays.iter().flat_map(|h| h.facilities.iter()) {
            match facilities
                .iter_mut()
                .find(|f| f.name.eq_ignore_ascii_case(name))
            {
                Some(f) => f.homestays += 1,
                None => facilities.push(Facility {
                    name: name.clone(),
                    homestays: 1,
                }),
            }
        }
        facilities.sort_by(|a, b| {
            b.homestays
                .cmp(&a.homestays)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        Ok(facilities)
    }
}

#[async_trait]
impl Inbox for MemoryStore {
    async fn contact_info(&self) -> Result<ContactInfo, Error> {
        let inner = self.inner.lock().unwrap();
        inner.contact.clone().ok_or(Error::NotFound)
    }

    async fn update_contact_info(&self, mut form: ContactInfoForm) -> Result<ContactInfo, Error> {
        form.normalize()?;
        let info = ContactInfo {
            phone: form.phone,
            email: form.email,
            whatsapp: form.whatsapp,
            address: form.address,
            instagram: form.instagram,
            updated_at: Utc::now(),
        };
        self.inner.lock().unwrap().contact = Some(info.clone());
        Ok(info)
    }

    async fn submit_message(&self, mut msg: NewContactMessage) -> Result<ContactMessage, Error> {
        msg.normalize()?;
        let mut inner = self.inner.lock().unwrap();
        let msg = ContactMessage {
            id: inner.next_id(),
            name: msg.name,
            email: msg.email,
            subject: msg.subject,
            message: msg.message,
            status: MessageStatus::Unread,
            created_at: Utc::now(),
        };
        inner.messages.push(msg.clone());
        Ok(msg)
    }

    async fn messages(&self, status: Option<MessageStatus>) -> Result<Vec<ContactMessage>, Error> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .messages
            .iter()
            .rev()
            .filter(|m| status.map_or(true, |s| m.status == s))
            .cloned()
            .collect())
    }

    async fn set_message_status(
        &self,
        id: MessageId,
        status: MessageStatus,
    ) -> Result<ContactMessage, Error> {
        let mut inner = self.inner.lock().unwrap();
        let msg = inner
            .messages
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(Error::NotFound)?;
        msg.status = status;
        Ok(msg.clone())
    }

    async fn delete_message(&self, id: MessageId) -> Result<(), Error> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.messages.len();
        inner.messages.retain(|m| m.id != id);
        if inner.messages.len() == before {
            return Err(Error::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl Listings for MemoryStore {
    async fn listings(&self, kind: ListingKind) -> Result<Vec<Listing>, Error> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .listings
            .iter()
            .filter(|l| l.kind == kind)
            .cloned()
            .collect())
    }
}
