// Charge calculation: base fee, frequent traveler discount, coupon discount
use crate::hotel_data::{HotelData, HotelError};
use crate::schedule::stay_length;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Discount granted to frequent travelers on new reservations, in percent.
pub const FREQUENT_TRAVELER_DISCOUNT_PCT: Decimal = dec!(15);

// 25 -> 0.25
pub fn percentage_to_fraction(percentage: Decimal) -> Decimal {
    percentage / dec!(100)
}

// 0.25 -> 25
pub fn fraction_to_percentage(fraction: Decimal) -> Decimal {
    fraction * dec!(100)
}

/// Undiscounted charge: inclusive day count times the daily rate of the room's type.
pub fn base_fee(
    data: &HotelData,
    date_start: NaiveDate,
    date_stop: NaiveDate,
    room_number: u32,
) -> Result<Decimal, HotelError> {
    let daily_rate = data.daily_rate_of(data.room_type_of(room_number)?)?;
    Ok(Decimal::from(stay_length(date_start, date_stop)) * daily_rate)
}

pub fn apply_percentage_discount(fee: Decimal, percentage: Decimal) -> Decimal {
    fee * (Decimal::ONE - percentage_to_fraction(percentage))
}

pub fn apply_traveler_discount(freq_traveler_status: bool, base_fee: Decimal) -> Decimal {
    apply_traveler_discount_at(freq_traveler_status, base_fee, FREQUENT_TRAVELER_DISCOUNT_PCT)
}

// Same as apply_traveler_discount with a caller-chosen percentage
pub fn apply_traveler_discount_at(
    freq_traveler_status: bool,
    base_fee: Decimal,
    percentage: Decimal,
) -> Decimal {
    let percentage = if freq_traveler_status {
        percentage
    } else {
        Decimal::ZERO
    };
    apply_percentage_discount(base_fee, percentage)
}

/// Coupon discount applied on top of whatever was charged so far.
pub fn apply_coupon_discount(current_fee: Decimal, coupon_percentage: Decimal) -> Decimal {
    apply_percentage_discount(current_fee, coupon_percentage)
}

/// Charge for a new reservation: base fee minus the traveler discount, if any.
///
/// `traveler_discount_pct` is normally [`FREQUENT_TRAVELER_DISCOUNT_PCT`].
pub fn reservation_fee(
    data: &HotelData,
    freq_traveler_status: bool,
    date_start: NaiveDate,
    date_stop: NaiveDate,
    room_number: u32,
    traveler_discount_pct: Decimal,
) -> Result<Decimal, HotelError> {
    let base = base_fee(data, date_start, date_stop, room_number)?;
    Ok(apply_traveler_discount_at(
        freq_traveler_status,
        base,
        traveler_discount_pct,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hotel_data::default_room_prices;
    use crate::hotel_data::fixtures::{date, room};
    use crate::model::RoomType;
    use test_case::test_case;

    fn data_with_rooms() -> HotelData {
        HotelData {
            rooms: vec![room(101, RoomType::Single), room(201, RoomType::Suite)],
            room_prices: default_room_prices(),
            ..HotelData::default()
        }
    }

    #[test_case(true, dec!(1200), dec!(1020); "frequent traveler gets 15 percent off")]
    #[test_case(false, dec!(1200), dec!(1200); "regular customer pays full price")]
    fn test_apply_traveler_discount(status: bool, base: Decimal, expected: Decimal) {
        assert_eq!(apply_traveler_discount(status, base), expected);
    }

    #[test_case(dec!(1000), dec!(100), dec!(0); "full coupon")]
    #[test_case(dec!(2000), dec!(10), dec!(1800); "ten percent coupon")]
    #[test_case(dec!(99.99), dec!(0), dec!(99.99); "zero percent coupon")]
    fn test_apply_coupon_discount(fee: Decimal, percentage: Decimal, expected: Decimal) {
        assert_eq!(apply_coupon_discount(fee, percentage), expected);
    }

    #[test]
    fn test_percentage_conversions_are_exact() {
        assert_eq!(percentage_to_fraction(dec!(25)), dec!(0.25));
        assert_eq!(percentage_to_fraction(dec!(12.5)), dec!(0.125));
        assert_eq!(fraction_to_percentage(dec!(0.25)), dec!(25));
        assert_eq!(fraction_to_percentage(dec!(0.015)), dec!(1.5));
    }

    #[test]
    fn test_base_fee_counts_inclusive_days() {
        let data = data_with_rooms();
        assert_eq!(
            base_fee(&data, date(2024, 5, 1), date(2024, 5, 1), 101).unwrap(),
            dec!(100)
        );
        assert_eq!(
            base_fee(&data, date(2024, 5, 1), date(2024, 5, 3), 201).unwrap(),
            dec!(1470)
        );
    }

    #[test]
    fn test_base_fee_unknown_room() {
        let data = data_with_rooms();
        assert!(base_fee(&data, date(2024, 5, 1), date(2024, 5, 2), 999).is_err());
    }

    #[test]
    fn test_reservation_fee_for_frequent_traveler() {
        let data = data_with_rooms();
        // 12 nights in a Single at 100 a day
        let fee = reservation_fee(
            &data,
            true,
            date(2024, 5, 1),
            date(2024, 5, 12),
            101,
            FREQUENT_TRAVELER_DISCOUNT_PCT,
        )
        .unwrap();
        assert_eq!(fee, dec!(1020));
    }

    #[test_case(true, dec!(20), dec!(800); "frequent traveler at twenty percent")]
    #[test_case(false, dec!(20), dec!(1000); "regular customer ignores the percentage")]
    fn test_reservation_fee_with_other_percentage(status: bool, pct: Decimal, expected: Decimal) {
        let data = data_with_rooms();
        let fee = reservation_fee(&data, status, date(2024, 7, 1), date(2024, 7, 10), 101, pct)
            .unwrap();
        assert_eq!(fee, expected);
    }

    #[test]
    fn test_coupon_stacks_on_discounted_fee() {
        let discounted = apply_traveler_discount(true, dec!(2000));
        assert_eq!(apply_coupon_discount(discounted, dec!(10)), dec!(1530));
    }
}
