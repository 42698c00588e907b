// Record types held in the seven hotel collections
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum RoomType {
    Single,
    Double,
    Suite,
}

impl RoomType {
    pub const ALL: [RoomType; 3] = [RoomType::Single, RoomType::Double, RoomType::Suite];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Single => "Single",
            RoomType::Double => "Double",
            RoomType::Suite => "Suite",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown room type: {0}")]
pub struct UnknownRoomType(pub String);

// Case-insensitive, so "suite" and "SUITE" both resolve
impl FromStr for RoomType {
    type Err = UnknownRoomType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoomType::ALL
            .into_iter()
            .find(|room_type| room_type.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownRoomType(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Room {
    pub room_number: u32,
    pub room_type: RoomType,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RoomPrice {
    pub room_type: RoomType,
    pub daily_rate: Decimal,
    pub daily_cleaning_cost: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Customer {
    pub customer_name: String,
    pub card_number: u64,
    pub freq_traveler_status: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Reservation {
    pub reservation_number: String,
    pub date_start: NaiveDate,
    pub date_stop: NaiveDate,
    pub room_number: u32,
    pub customer_name: String,
    pub payment_confirmation: String,
    pub charged_fees: Decimal,
}

impl Reservation {
    // Same record with only the charged fees swapped out
    pub fn with_charged_fees(&self, charged_fees: Decimal) -> Self {
        Self {
            charged_fees,
            ..self.clone()
        }
    }
}

// A refund is a reservation moved out of the active collection, field for field
pub type Refund = Reservation;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CouponCode {
    pub coupon_code: String,
    /// Percentage on a 0-100 scale, not a fraction.
    pub discount_percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CouponRedemption {
    pub reservation_number_applied: String,
    pub coupon_code_used: String,
}
