// Front desk operations: business rules on top of the core engine, flushed to the store
use crate::config::HotelConfig;
use crate::hotel_data::{HotelData, HotelError};
use crate::model::{CouponCode, CouponRedemption, Customer, Reservation, Room, RoomPrice, RoomType};
use crate::occupancy::{
    date_range_report, reservations_during, reservations_of_customer, unreserved_room_numbers,
    DateRangeReport,
};
use crate::pricing::{apply_coupon_discount, reservation_fee};
use crate::storage::{Collection, FileStore, HotelStore, StorageError};
use chrono::{Local, NaiveDate};
use rand::Rng;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

const PAYMENT_CONFIRMATION_CHARS: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*";

const MIN_CARD_NUMBER: u64 = 1_000_000_000_000_000;
const MAX_CARD_NUMBER: u64 = 9_999_999_999_999_999;

// Business rule violations; the request is refused and nothing changes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("End date should not come before the starting date!")]
    InvalidDateRange,

    #[error("None of our rooms are available during {date_start} - {date_stop}!")]
    NoRoomsAvailable {
        date_start: NaiveDate,
        date_stop: NaiveDate,
    },

    #[error("Room {0} does not exist on file!")]
    UnknownRoom(u32),

    #[error("Room {0} already exists on file!")]
    RoomAlreadyExists(u32),

    #[error("Room type {0} has no price on file!")]
    UnpricedRoomType(RoomType),

    #[error("That room is already reserved during that time!")]
    RoomAlreadyReserved,

    #[error("Customer \"{0}\" is not on file!")]
    UnknownCustomer(String),

    #[error(
        "There are {count} customers on file with the name {name}. \
         One of them already has the card number {card_number}!"
    )]
    DuplicateCustomer {
        name: String,
        card_number: u64,
        count: usize,
    },

    #[error("Card number must be 16 digits!")]
    InvalidCardNumber(u64),

    #[error("There is more than 1 customer under the name {0}. A matching card number is required")]
    AmbiguousCustomer(String),

    #[error("Customer \"{0}\" does not have any reservation on file!")]
    NoReservations(String),

    #[error("There is more than 1 reservation made under the name \"{0}\"!")]
    AmbiguousReservation(String),

    #[error("Reservation {0} is not on file!")]
    UnknownReservation(String),

    #[error("We do not apply coupons to past reservations!")]
    PastReservation,

    #[error("Coupon code {0} is not on file!")]
    UnknownCoupon(String),

    #[error("Coupon code {0} already exists on file!")]
    CouponAlreadyExists(String),

    #[error("A reservation cannot use the same coupon code more than once!")]
    CouponAlreadyRedeemed,

    #[error("{room_type} already has a daily rate of {daily_rate}!")]
    RateUnchanged {
        room_type: RoomType,
        daily_rate: Decimal,
    },

    #[error("Percentage must be between 0 and 100, got {0}")]
    InvalidPercentage(Decimal),

    #[error("Invalid {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("Rejected: {0}")]
    Rejected(#[from] Rejection),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Hotel data error: {0}")]
    Hotel(#[from] HotelError),
}

impl DeskError {
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            DeskError::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }
}

fn reject<T>(rejection: Rejection) -> Result<T, DeskError> {
    debug!("Request rejected: {}", rejection);
    Err(DeskError::Rejected(rejection))
}

// Free text ends up inside a comma-delimited line
fn check_text(field: &'static str, value: &str) -> Result<(), DeskError> {
    if value.trim().is_empty() || value.contains([',', '\n', '\r']) {
        return reject(Rejection::InvalidField {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

fn check_date_range(date_start: NaiveDate, date_stop: NaiveDate) -> Result<(), DeskError> {
    if date_start > date_stop {
        return reject(Rejection::InvalidDateRange);
    }
    Ok(())
}

pub fn generate_payment_confirmation(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| {
            let index = rng.gen_range(0..PAYMENT_CONFIRMATION_CHARS.len());
            PAYMENT_CONFIRMATION_CHARS[index] as char
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    pub date_start: NaiveDate,
    pub date_stop: NaiveDate,
    pub room_number: u32,
    pub customer_name: String,
    // Only consulted when several customers share the name
    pub card_number: Option<u64>,
}

/// The hotel's front desk.
///
/// Owns the in-memory collections and rewrites the touched collection files
/// after every successful change. A failed write leaves memory ahead of disk.
pub struct FrontDesk<S: HotelStore> {
    data: HotelData,
    store: S,
    config: HotelConfig,
    fixed_today: Option<NaiveDate>,
}

impl<S: HotelStore> FrontDesk<S> {
    pub fn open(store: S, config: HotelConfig) -> Result<Self, DeskError> {
        let data = store.load()?;
        Ok(Self {
            data,
            store,
            config,
            fixed_today: None,
        })
    }

    // Pin "today" instead of reading the local clock
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.fixed_today
            .unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn data(&self) -> &HotelData {
        &self.data
    }

    pub fn config(&self) -> &HotelConfig {
        &self.config
    }

    fn flush(&self, collection: Collection) -> Result<(), DeskError> {
        self.store.save(&self.data, collection)?;
        Ok(())
    }

    pub fn add_room(&mut self, room_number: u32, room_type: RoomType) -> Result<(), DeskError> {
        if self.data.room_exists(room_number) {
            return reject(Rejection::RoomAlreadyExists(room_number));
        }
        if !self.data.room_type_priced(room_type) {
            return reject(Rejection::UnpricedRoomType(room_type));
        }

        self.data.rooms.push(Room {
            room_number,
            room_type,
        });
        self.flush(Collection::Rooms)?;
        info!("Room {} ({}) added", room_number, room_type);
        Ok(())
    }

    pub fn add_customer(
        &mut self,
        customer_name: &str,
        card_number: u64,
        freq_traveler_status: bool,
    ) -> Result<(), DeskError> {
        check_text("customer name", customer_name)?;
        if !(MIN_CARD_NUMBER..=MAX_CARD_NUMBER).contains(&card_number) {
            return reject(Rejection::InvalidCardNumber(card_number));
        }

        let same_name = self.data.customers_named(customer_name);
        if HotelData::card_number_in(card_number, &same_name) {
            return reject(Rejection::DuplicateCustomer {
                name: customer_name.to_string(),
                card_number,
                count: same_name.len(),
            });
        }

        self.data.customers.push(Customer {
            customer_name: customer_name.to_string(),
            card_number,
            freq_traveler_status,
        });
        self.flush(Collection::Customers)?;
        info!("Customer {} added", customer_name);
        Ok(())
    }

    // Frequent traveler status of the customer the request points at
    fn resolve_traveler_status(&self, request: &BookingRequest) -> Result<bool, DeskError> {
        let candidates = self.data.customers_named(&request.customer_name);
        match candidates.as_slice() {
            [] => reject(Rejection::UnknownCustomer(request.customer_name.clone())),
            [only] => Ok(only.freq_traveler_status),
            _ => {
                let matched = request.card_number.and_then(|card_number| {
                    candidates
                        .iter()
                        .find(|customer| customer.card_number == card_number)
                });
                match matched {
                    Some(customer) => Ok(customer.freq_traveler_status),
                    None => reject(Rejection::AmbiguousCustomer(request.customer_name.clone())),
                }
            }
        }
    }

    pub fn book(&mut self, request: BookingRequest) -> Result<Reservation, DeskError> {
        let BookingRequest {
            date_start,
            date_stop,
            room_number,
            ..
        } = request;

        check_date_range(date_start, date_stop)?;
        let taken = reservations_during(&self.data, date_start, date_stop);
        if unreserved_room_numbers(&self.data, &taken).is_empty() {
            return reject(Rejection::NoRoomsAvailable {
                date_start,
                date_stop,
            });
        }
        if !self.data.room_exists(room_number) {
            return reject(Rejection::UnknownRoom(room_number));
        }
        if self
            .data
            .overlaps_existing_reservation(date_start, date_stop, room_number)
        {
            return reject(Rejection::RoomAlreadyReserved);
        }
        let freq_traveler_status = self.resolve_traveler_status(&request)?;

        let charged_fees = reservation_fee(
            &self.data,
            freq_traveler_status,
            date_start,
            date_stop,
            room_number,
            self.config.frequent_traveler_discount_pct,
        )?;

        let reservation = Reservation {
            reservation_number: Uuid::new_v4().to_string(),
            date_start,
            date_stop,
            room_number,
            customer_name: request.customer_name,
            payment_confirmation: generate_payment_confirmation(
                self.config.payment_confirmation_length,
            ),
            charged_fees,
        };
        self.data.reservations.push(reservation.clone());
        self.flush(Collection::Reservations)?;

        info!(
            "Reservation {} booked: room {} from {} to {} for {}",
            reservation.reservation_number,
            room_number,
            date_start,
            date_stop,
            charged_fees
        );
        Ok(reservation)
    }

    pub fn available_rooms(
        &self,
        date_start: NaiveDate,
        date_stop: NaiveDate,
    ) -> Result<Vec<Room>, DeskError> {
        check_date_range(date_start, date_stop)?;
        let taken = reservations_during(&self.data, date_start, date_stop);
        unreserved_room_numbers(&self.data, &taken)
            .into_iter()
            .map(|room_number| {
                Ok(Room {
                    room_number,
                    room_type: self.data.room_type_of(room_number)?,
                })
            })
            .collect()
    }

    pub fn reservation_report(
        &self,
        date_start: NaiveDate,
        date_stop: NaiveDate,
    ) -> Result<Vec<Reservation>, DeskError> {
        check_date_range(date_start, date_stop)?;
        Ok(reservations_during(&self.data, date_start, date_stop))
    }

    pub fn customer_reservations(
        &self,
        customer_name: &str,
        want_future: bool,
    ) -> Result<Vec<Reservation>, DeskError> {
        if !self.data.customer_name_exists(customer_name) {
            return reject(Rejection::UnknownCustomer(customer_name.to_string()));
        }
        Ok(reservations_of_customer(
            &self.data,
            customer_name,
            want_future,
            self.today(),
        ))
    }

    pub fn change_room_price(
        &mut self,
        room_type: RoomType,
        daily_rate: Decimal,
    ) -> Result<(), DeskError> {
        if daily_rate < Decimal::ZERO {
            return reject(Rejection::InvalidField {
                field: "daily rate",
                value: daily_rate.to_string(),
            });
        }
        let Ok(index) = self.data.index_of_room_type(room_type) else {
            return reject(Rejection::UnpricedRoomType(room_type));
        };
        let current = self.data.room_prices[index].clone();
        if current.daily_rate == daily_rate {
            return reject(Rejection::RateUnchanged {
                room_type,
                daily_rate,
            });
        }

        self.data.replace_room_price(
            index,
            RoomPrice {
                daily_rate,
                ..current
            },
        )?;
        self.flush(Collection::RoomPrices)?;
        info!("Daily rate of {} changed to {}", room_type, daily_rate);
        Ok(())
    }

    /// Cancels a reservation in full and moves it to the refunds collection.
    ///
    /// A reservation number is only needed when the customer holds several.
    pub fn refund(
        &mut self,
        customer_name: &str,
        reservation_number: Option<&str>,
    ) -> Result<Reservation, DeskError> {
        if !self.data.customer_name_exists(customer_name) {
            return reject(Rejection::UnknownCustomer(customer_name.to_string()));
        }
        let held = self.data.reservations_under_name(customer_name).len();
        if held == 0 {
            return reject(Rejection::NoReservations(customer_name.to_string()));
        }
        if held > 1 && reservation_number.is_none() {
            return reject(Rejection::AmbiguousReservation(customer_name.to_string()));
        }

        let index = match self
            .data
            .index_of_reservation(customer_name, reservation_number)
        {
            Ok(index) => index,
            Err(_) => {
                return reject(Rejection::UnknownReservation(
                    reservation_number.unwrap_or_default().to_string(),
                ))
            }
        };

        let refunded = self.data.reservations[index].clone();
        self.data.move_reservation_to_refunds(index)?;
        self.flush(Collection::Reservations)?;
        self.flush(Collection::Refunds)?;

        info!(
            "Reservation {} of {} refunded ({})",
            refunded.reservation_number, customer_name, refunded.charged_fees
        );
        Ok(refunded)
    }

    /// Discounts a current or upcoming reservation with a coupon, once per code.
    ///
    /// Returns the new charged fees.
    pub fn apply_coupon(
        &mut self,
        reservation_number: &str,
        coupon_code: &str,
    ) -> Result<Decimal, DeskError> {
        let Some(index) = self.data.index_of_reservation_number(reservation_number) else {
            return reject(Rejection::UnknownReservation(reservation_number.to_string()));
        };
        if self.data.reservation_is_past(index, self.today())? {
            return reject(Rejection::PastReservation);
        }
        let Some(coupon_index) = self.data.find_coupon(coupon_code) else {
            return reject(Rejection::UnknownCoupon(coupon_code.to_string()));
        };
        if self.data.has_redeemed(reservation_number, coupon_code) {
            return reject(Rejection::CouponAlreadyRedeemed);
        }

        let percentage = self.data.coupon_codes[coupon_index].discount_percentage;
        let charged_fees =
            apply_coupon_discount(self.data.reservations[index].charged_fees, percentage);

        self.data.replace_reservation_fee(index, charged_fees)?;
        self.flush(Collection::Reservations)?;

        self.data.coupon_redemptions.push(CouponRedemption {
            reservation_number_applied: reservation_number.to_string(),
            coupon_code_used: coupon_code.to_string(),
        });
        self.flush(Collection::CouponRedemptions)?;

        info!(
            "Coupon {} applied to reservation {}, now {}",
            coupon_code, reservation_number, charged_fees
        );
        Ok(charged_fees)
    }

    pub fn create_coupon(
        &mut self,
        coupon_code: &str,
        discount_percentage: Decimal,
    ) -> Result<(), DeskError> {
        check_text("coupon code", coupon_code)?;
        if discount_percentage < Decimal::ZERO || discount_percentage > Decimal::ONE_HUNDRED {
            return reject(Rejection::InvalidPercentage(discount_percentage));
        }
        if self.data.find_coupon(coupon_code).is_some() {
            return reject(Rejection::CouponAlreadyExists(coupon_code.to_string()));
        }

        self.data.coupon_codes.push(CouponCode {
            coupon_code: coupon_code.to_string(),
            discount_percentage,
        });
        self.flush(Collection::CouponCodes)?;
        info!("Coupon {} created at {}%", coupon_code, discount_percentage);
        Ok(())
    }

    pub fn coupon_codes(&self) -> &[CouponCode] {
        &self.data.coupon_codes
    }

    pub fn coupon_redemptions(&self) -> &[CouponRedemption] {
        &self.data.coupon_redemptions
    }

    pub fn utilization_report(
        &self,
        date_start: NaiveDate,
        date_stop: NaiveDate,
    ) -> Result<DateRangeReport, DeskError> {
        check_date_range(date_start, date_stop)?;
        Ok(date_range_report(&self.data, date_start, date_stop)?)
    }

    /// Empties every collection except room prices, on disk as well.
    pub fn clean_slate(&mut self) -> Result<(), DeskError> {
        self.data = HotelData {
            room_prices: std::mem::take(&mut self.data.room_prices),
            ..HotelData::default()
        };
        self.store.save_all(&self.data)?;
        info!("All collections except room prices cleared");
        Ok(())
    }
}

impl FrontDesk<FileStore> {
    // Desk over the collection files in the configured data directory
    pub fn open_data_dir(config: HotelConfig) -> Result<Self, DeskError> {
        let store = FileStore::new(&config.data_dir);
        Self::open(store, config)
    }
}
