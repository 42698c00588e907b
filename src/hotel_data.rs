// In-memory state of the hotel: the seven collections plus lookups and positional edits
use crate::model::{
    CouponCode, CouponRedemption, Customer, Refund, Reservation, Room, RoomPrice, RoomType,
};
use crate::schedule::overlaps;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

// Failures raised by the core when a caller breaks a precondition
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HotelError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{collection} collection contains less than {required} items")]
    IndexOutOfRange {
        collection: &'static str,
        required: usize,
    },
}

impl HotelError {
    fn index_out_of_range(collection: &'static str, index: usize) -> Self {
        HotelError::IndexOutOfRange {
            collection,
            required: index + 1,
        }
    }
}

// Prices seeded when the room price collection starts out empty
pub fn default_room_prices() -> Vec<RoomPrice> {
    vec![
        RoomPrice {
            room_type: RoomType::Single,
            daily_rate: dec!(100),
            daily_cleaning_cost: dec!(30),
        },
        RoomPrice {
            room_type: RoomType::Double,
            daily_rate: dec!(199),
            daily_cleaning_cost: dec!(40),
        },
        RoomPrice {
            room_type: RoomType::Suite,
            daily_rate: dec!(490),
            daily_cleaning_cost: dec!(60),
        },
    ]
}

/// Everything the hotel knows, in file line order.
///
/// Handed by reference to the pricing and occupancy functions; nothing in
/// this crate keeps process-wide copies of these collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HotelData {
    pub rooms: Vec<Room>,
    pub room_prices: Vec<RoomPrice>,
    pub customers: Vec<Customer>,
    pub reservations: Vec<Reservation>,
    pub refunds: Vec<Refund>,
    pub coupon_codes: Vec<CouponCode>,
    pub coupon_redemptions: Vec<CouponRedemption>,
}

impl HotelData {
    pub fn new() -> Self {
        Self::default()
    }

    // Empty collections except for the default price list
    pub fn with_default_prices() -> Self {
        Self {
            room_prices: default_room_prices(),
            ..Self::default()
        }
    }

    pub fn room_type_of(&self, room_number: u32) -> Result<RoomType, HotelError> {
        self.rooms
            .iter()
            .find(|room| room.room_number == room_number)
            .map(|room| room.room_type)
            .ok_or_else(|| HotelError::NotFound(format!("Room {} does not exist.", room_number)))
    }

    pub fn daily_rate_of(&self, room_type: RoomType) -> Result<Decimal, HotelError> {
        self.price_of(room_type).map(|price| price.daily_rate)
    }

    pub fn daily_cleaning_cost_of(&self, room_type: RoomType) -> Result<Decimal, HotelError> {
        self.price_of(room_type)
            .map(|price| price.daily_cleaning_cost)
    }

    fn price_of(&self, room_type: RoomType) -> Result<&RoomPrice, HotelError> {
        self.room_prices
            .iter()
            .find(|price| price.room_type == room_type)
            .ok_or_else(|| {
                HotelError::NotFound(format!("Room type {} does not exist.", room_type))
            })
    }

    pub fn index_of_room_type(&self, room_type: RoomType) -> Result<usize, HotelError> {
        self.room_prices
            .iter()
            .position(|price| price.room_type == room_type)
            .ok_or_else(|| {
                HotelError::NotFound(format!("Room type {} does not exist.", room_type))
            })
    }

    /// Position of a reservation made under `customer_name`.
    ///
    /// With no reservation number the first reservation under the name wins,
    /// which is only meaningful when the customer holds exactly one.
    pub fn index_of_reservation(
        &self,
        customer_name: &str,
        reservation_number: Option<&str>,
    ) -> Result<usize, HotelError> {
        self.reservations
            .iter()
            .position(|reservation| {
                reservation.customer_name == customer_name
                    && reservation_number.map_or(true, |number| {
                        reservation.reservation_number == number
                    })
            })
            .ok_or_else(|| {
                HotelError::NotFound(
                    "Invalid customer name and/or reservation number for reservations."
                        .to_string(),
                )
            })
    }

    pub fn index_of_reservation_number(&self, reservation_number: &str) -> Option<usize> {
        self.reservations
            .iter()
            .position(|reservation| reservation.reservation_number == reservation_number)
    }

    pub fn find_coupon(&self, coupon_code: &str) -> Option<usize> {
        self.coupon_codes
            .iter()
            .position(|coupon| coupon.coupon_code == coupon_code)
    }

    // Found flag plus index, -1 when the code is not on file
    pub fn coupon_index_of(&self, coupon_code: &str) -> (bool, isize) {
        match self.find_coupon(coupon_code) {
            Some(index) => (true, index as isize),
            None => (false, -1),
        }
    }

    pub fn room_exists(&self, room_number: u32) -> bool {
        self.rooms.iter().any(|room| room.room_number == room_number)
    }

    pub fn room_type_priced(&self, room_type: RoomType) -> bool {
        self.room_prices
            .iter()
            .any(|price| price.room_type == room_type)
    }

    pub fn customer_name_exists(&self, customer_name: &str) -> bool {
        self.customers
            .iter()
            .any(|customer| customer.customer_name == customer_name)
    }

    pub fn customers_named(&self, customer_name: &str) -> Vec<Customer> {
        self.customers
            .iter()
            .filter(|customer| customer.customer_name == customer_name)
            .cloned()
            .collect()
    }

    pub fn card_number_in(card_number: u64, customers: &[Customer]) -> bool {
        customers
            .iter()
            .any(|customer| customer.card_number == card_number)
    }

    pub fn reservations_under_name(&self, customer_name: &str) -> Vec<Reservation> {
        self.reservations
            .iter()
            .filter(|reservation| reservation.customer_name == customer_name)
            .cloned()
            .collect()
    }

    pub fn has_redeemed(&self, reservation_number: &str, coupon_code: &str) -> bool {
        self.coupon_redemptions.iter().any(|redemption| {
            redemption.reservation_number_applied == reservation_number
                && redemption.coupon_code_used == coupon_code
        })
    }

    /// Frequent traveler flag of the first customer with this name.
    ///
    /// Customers sharing a name are not told apart here; callers that need
    /// the exact customer go through [`HotelData::customers_named`].
    pub fn is_freq_traveler(&self, customer_name: &str) -> Result<bool, HotelError> {
        self.customers
            .iter()
            .find(|customer| customer.customer_name == customer_name)
            .map(|customer| customer.freq_traveler_status)
            .ok_or_else(|| {
                HotelError::NotFound(format!("Customer {} does not exist.", customer_name))
            })
    }

    pub fn overlaps_existing_reservation(
        &self,
        date_start: NaiveDate,
        date_stop: NaiveDate,
        room_number: u32,
    ) -> bool {
        self.reservations.iter().any(|reservation| {
            reservation.room_number == room_number
                && overlaps(
                    date_start,
                    date_stop,
                    reservation.date_start,
                    reservation.date_stop,
                )
        })
    }

    pub fn reservation_is_past(&self, index: usize, today: NaiveDate) -> Result<bool, HotelError> {
        self.reservations
            .get(index)
            .map(|reservation| reservation.date_stop < today)
            .ok_or_else(|| HotelError::index_out_of_range("reservations", index))
    }

    pub fn move_reservation_to_refunds(&mut self, index: usize) -> Result<(), HotelError> {
        if index >= self.reservations.len() {
            return Err(HotelError::index_out_of_range("reservations", index));
        }
        let reservation = self.reservations.remove(index);
        self.refunds.push(reservation);
        Ok(())
    }

    pub fn replace_room_price(&mut self, index: usize, price: RoomPrice) -> Result<(), HotelError> {
        match self.room_prices.get_mut(index) {
            Some(slot) => {
                *slot = price;
                Ok(())
            }
            None => Err(HotelError::index_out_of_range("room prices", index)),
        }
    }

    pub fn replace_reservation_fee(
        &mut self,
        index: usize,
        charged_fees: Decimal,
    ) -> Result<(), HotelError> {
        match self.reservations.get_mut(index) {
            Some(slot) => {
                *slot = slot.with_charged_fees(charged_fees);
                Ok(())
            }
            None => Err(HotelError::index_out_of_range("reservations", index)),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn room(room_number: u32, room_type: RoomType) -> Room {
        Room {
            room_number,
            room_type,
        }
    }

    pub fn customer(name: &str, card_number: u64, freq: bool) -> Customer {
        Customer {
            customer_name: name.to_string(),
            card_number,
            freq_traveler_status: freq,
        }
    }

    pub fn reservation(
        number: &str,
        start: NaiveDate,
        stop: NaiveDate,
        room_number: u32,
        name: &str,
        fees: Decimal,
    ) -> Reservation {
        Reservation {
            reservation_number: number.to_string(),
            date_start: start,
            date_stop: stop,
            room_number,
            customer_name: name.to_string(),
            payment_confirmation: "123456789012345678901234567890".to_string(),
            charged_fees: fees,
        }
    }

    pub fn three_reservations() -> Vec<Reservation> {
        vec![
            reservation("res-0", date(2024, 1, 6), date(2024, 1, 10), 105, "John Daa", dec!(50)),
            reservation(
                "res-1",
                date(2024, 1, 9),
                date(2024, 1, 11),
                110,
                "John Average",
                dec!(50),
            ),
            reservation(
                "res-2",
                date(2024, 1, 10),
                date(2024, 1, 15),
                201,
                "John Excellent",
                dec!(50),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use test_case::test_case;

    fn sample_data() -> HotelData {
        HotelData {
            rooms: vec![
                room(101, RoomType::Single),
                room(102, RoomType::Double),
                room(103, RoomType::Suite),
            ],
            room_prices: default_room_prices(),
            customers: vec![
                customer("Bob", 1234567890123456, true),
                customer("Alice", 2345678901234567, false),
                customer("Bob", 3456789012345678, false),
            ],
            reservations: three_reservations(),
            coupon_codes: vec![
                CouponCode {
                    coupon_code: "SPRING10".to_string(),
                    discount_percentage: dec!(10),
                },
                CouponCode {
                    coupon_code: "VIP".to_string(),
                    discount_percentage: dec!(25),
                },
            ],
            coupon_redemptions: vec![CouponRedemption {
                reservation_number_applied: "res-1".to_string(),
                coupon_code_used: "VIP".to_string(),
            }],
            ..HotelData::default()
        }
    }

    #[test_case(101, RoomType::Single)]
    #[test_case(103, RoomType::Suite)]
    fn test_room_type_of(room_number: u32, expected: RoomType) {
        assert_eq!(sample_data().room_type_of(room_number).unwrap(), expected);
    }

    #[test]
    fn test_room_type_of_unknown_room_is_not_found() {
        let err = sample_data().room_type_of(999).unwrap_err();
        assert_eq!(err, HotelError::NotFound("Room 999 does not exist.".to_string()));
    }

    #[test]
    fn test_daily_rate_and_cleaning_cost() {
        let data = sample_data();
        assert_eq!(data.daily_rate_of(RoomType::Double).unwrap(), dec!(199));
        assert_eq!(data.daily_cleaning_cost_of(RoomType::Suite).unwrap(), dec!(60));

        let empty = HotelData::new();
        assert!(matches!(
            empty.daily_rate_of(RoomType::Single),
            Err(HotelError::NotFound(_))
        ));
    }

    #[test_case(RoomType::Single, 0)]
    #[test_case(RoomType::Suite, 2)]
    fn test_index_of_room_type(room_type: RoomType, expected: usize) {
        assert_eq!(sample_data().index_of_room_type(room_type).unwrap(), expected);
    }

    #[test]
    fn test_index_of_reservation_by_name_only_takes_first_match() {
        let mut data = sample_data();
        data.reservations.push(reservation(
            "res-3",
            date(2024, 2, 1),
            date(2024, 2, 2),
            101,
            "John Average",
            dec!(100),
        ));
        assert_eq!(data.index_of_reservation("John Average", None).unwrap(), 1);
        assert_eq!(
            data.index_of_reservation("John Average", Some("res-3")).unwrap(),
            3
        );
        assert!(data.index_of_reservation("John Average", Some("res-0")).is_err());
    }

    #[test]
    fn test_coupon_index_of_keeps_minus_one_when_missing() {
        let data = sample_data();
        assert_eq!(data.coupon_index_of("VIP"), (true, 1));
        assert_eq!(data.coupon_index_of("WINTER"), (false, -1));
        assert_eq!(data.find_coupon("SPRING10"), Some(0));
        assert_eq!(data.find_coupon("WINTER"), None);
    }

    #[test]
    fn test_existence_queries() {
        let data = sample_data();
        assert!(data.room_exists(102));
        assert!(!data.room_exists(104));
        assert!(data.room_type_priced(RoomType::Double));
        assert!(!HotelData::new().room_type_priced(RoomType::Double));
        assert!(data.customer_name_exists("Alice"));
        assert!(!data.customer_name_exists("alice"));
        assert!(data.has_redeemed("res-1", "VIP"));
        assert!(!data.has_redeemed("res-1", "SPRING10"));
    }

    #[test]
    fn test_customers_sharing_a_name() {
        let data = sample_data();
        let bobs = data.customers_named("Bob");
        assert_eq!(bobs.len(), 2);
        assert!(HotelData::card_number_in(3456789012345678, &bobs));
        assert!(!HotelData::card_number_in(2345678901234567, &bobs));
        // first Bob on file decides
        assert!(data.is_freq_traveler("Bob").unwrap());
        assert!(!data.is_freq_traveler("Alice").unwrap());
        assert!(data.is_freq_traveler("Carol").is_err());
    }

    #[test]
    fn test_overlaps_existing_reservation_only_checks_that_room() {
        let data = sample_data();
        assert!(data.overlaps_existing_reservation(date(2024, 1, 10), date(2024, 1, 12), 105));
        assert!(!data.overlaps_existing_reservation(date(2024, 1, 11), date(2024, 1, 12), 105));
        assert!(!data.overlaps_existing_reservation(date(2024, 1, 6), date(2024, 1, 10), 999));
    }

    #[test]
    fn test_reservation_is_past() {
        let data = sample_data();
        assert!(data.reservation_is_past(0, date(2024, 1, 11)).unwrap());
        assert!(!data.reservation_is_past(0, date(2024, 1, 10)).unwrap());
        assert!(data.reservation_is_past(3, date(2024, 1, 10)).is_err());
    }

    #[test]
    fn test_move_reservation_to_refunds() {
        let mut data = sample_data();
        let original = three_reservations();

        data.move_reservation_to_refunds(0).unwrap();

        assert_eq!(data.reservations, vec![original[1].clone(), original[2].clone()]);
        assert_eq!(data.refunds, vec![original[0].clone()]);
    }

    #[test]
    fn test_move_reservation_to_refunds_out_of_range() {
        let mut data = sample_data();
        let err = data.move_reservation_to_refunds(17).unwrap_err();
        assert_eq!(err.to_string(), "reservations collection contains less than 18 items");
        assert_eq!(data.reservations.len(), 3);
        assert!(data.refunds.is_empty());
    }

    #[test]
    fn test_replace_room_price_keeps_position() {
        let mut data = sample_data();
        let updated = RoomPrice {
            room_type: RoomType::Suite,
            daily_rate: dec!(520),
            daily_cleaning_cost: dec!(60),
        };
        data.replace_room_price(2, updated.clone()).unwrap();
        assert_eq!(data.room_prices[2], updated);
        assert_eq!(data.room_prices[0].room_type, RoomType::Single);

        let err = data.replace_room_price(3, updated).unwrap_err();
        assert_eq!(err.to_string(), "room prices collection contains less than 4 items");
    }

    #[test]
    fn test_replace_reservation_fee() {
        let mut data = sample_data();
        data.replace_reservation_fee(1, dec!(45)).unwrap();
        assert_eq!(
            data.reservations[1],
            three_reservations()[1].with_charged_fees(dec!(45))
        );
        assert_eq!(data.reservations[0], three_reservations()[0]);

        let err = data.replace_reservation_fee(100, dec!(1)).unwrap_err();
        assert_eq!(
            err,
            HotelError::IndexOutOfRange {
                collection: "reservations",
                required: 101
            }
        );
    }
}
