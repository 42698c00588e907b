// Availability and occupancy engine
// Works purely over a HotelData snapshot; the caller decides what "today" is.
use crate::hotel_data::{HotelData, HotelError};
use crate::model::{Reservation, RoomType};
use crate::schedule::{contains, days_between, overlaps, stay_length};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

// Result of asking whether a single room was taken on a single date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoomOccupancy {
    pub occupied: bool,
    pub daily_revenue: Decimal,
    pub daily_cleaning_cost: Decimal,
}

impl RoomOccupancy {
    pub const VACANT: RoomOccupancy = RoomOccupancy {
        occupied: false,
        daily_revenue: Decimal::ZERO,
        daily_cleaning_cost: Decimal::ZERO,
    };
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomReport {
    pub room_number: u32,
    pub room_type: RoomType,
    pub occupied: bool,
    pub daily_revenue: Decimal,
    pub daily_cleaning_cost: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateReport {
    pub date: NaiveDate,
    pub rooms: Vec<RoomReport>,
    /// Occupied rooms over all rooms, on a 0-100 scale.
    pub occupancy_percentage: f64,
    pub revenue: Decimal,
    pub cleaning_cost: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateRangeReport {
    pub date_start: NaiveDate,
    pub date_stop: NaiveDate,
    pub dates: Vec<DateReport>,
    pub total_revenue: Decimal,
    pub total_cleaning_cost: Decimal,
}

/// Room numbers on file that none of `reserved` occupies, in room order.
pub fn unreserved_room_numbers(data: &HotelData, reserved: &[Reservation]) -> Vec<u32> {
    data.rooms
        .iter()
        .map(|room| room.room_number)
        .filter(|room_number| {
            !reserved
                .iter()
                .any(|reservation| reservation.room_number == *room_number)
        })
        .collect()
}

/// Reservations whose stay overlaps `[date_start, date_stop]` at all.
pub fn reservations_during(
    data: &HotelData,
    date_start: NaiveDate,
    date_stop: NaiveDate,
) -> Vec<Reservation> {
    data.reservations
        .iter()
        .filter(|reservation| {
            overlaps(
                reservation.date_start,
                reservation.date_stop,
                date_start,
                date_stop,
            )
        })
        .cloned()
        .collect()
}

/// Past or future reservations of a customer relative to `today`.
///
/// Future means starting after today, past means ending before today. A stay
/// that spans today is in neither list.
pub fn reservations_of_customer(
    data: &HotelData,
    customer_name: &str,
    want_future: bool,
    today: NaiveDate,
) -> Vec<Reservation> {
    data.reservations
        .iter()
        .filter(|reservation| reservation.customer_name == customer_name)
        .filter(|reservation| {
            if want_future {
                reservation.date_start > today
            } else {
                reservation.date_stop < today
            }
        })
        .cloned()
        .collect()
}

/// Occupancy of one room on one date.
///
/// Revenue is the matching reservation's charge spread evenly over its days;
/// cleaning cost is the room type's flat daily cost.
pub fn room_occupied_on_date(
    data: &HotelData,
    room_number: u32,
    date: NaiveDate,
) -> Result<RoomOccupancy, HotelError> {
    let reservation = data.reservations.iter().find(|reservation| {
        reservation.room_number == room_number
            && contains(reservation.date_start, reservation.date_stop, date)
    });

    let Some(reservation) = reservation else {
        return Ok(RoomOccupancy::VACANT);
    };

    let days = Decimal::from(stay_length(reservation.date_start, reservation.date_stop));
    let room_type = data.room_type_of(room_number)?;
    Ok(RoomOccupancy {
        occupied: true,
        daily_revenue: reservation.charged_fees / days,
        daily_cleaning_cost: data.daily_cleaning_cost_of(room_type)?,
    })
}

// Occupancy share on a 0-100 scale; a hotel with no rooms reports 0
fn occupancy_percentage(occupied: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    occupied as f64 / total as f64 * 100.0
}

pub fn date_report(data: &HotelData, date: NaiveDate) -> Result<DateReport, HotelError> {
    let mut rooms = Vec::with_capacity(data.rooms.len());
    let mut occupied_count = 0;
    let mut revenue = Decimal::ZERO;
    let mut cleaning_cost = Decimal::ZERO;

    for room in &data.rooms {
        let occupancy = room_occupied_on_date(data, room.room_number, date)?;
        if occupancy.occupied {
            occupied_count += 1;
            revenue += occupancy.daily_revenue;
            cleaning_cost += occupancy.daily_cleaning_cost;
        }
        rooms.push(RoomReport {
            room_number: room.room_number,
            room_type: room.room_type,
            occupied: occupancy.occupied,
            daily_revenue: occupancy.daily_revenue,
            daily_cleaning_cost: occupancy.daily_cleaning_cost,
        });
    }

    Ok(DateReport {
        date,
        occupancy_percentage: occupancy_percentage(occupied_count, rooms.len()),
        rooms,
        revenue,
        cleaning_cost,
    })
}

/// Per-date utilization for every room, with totals over the whole range.
pub fn date_range_report(
    data: &HotelData,
    date_start: NaiveDate,
    date_stop: NaiveDate,
) -> Result<DateRangeReport, HotelError> {
    let dates = days_between(date_start, date_stop)
        .into_iter()
        .map(|date| date_report(data, date))
        .collect::<Result<Vec<_>, _>>()?;

    let total_revenue = dates.iter().map(|report| report.revenue).sum();
    let total_cleaning_cost = dates.iter().map(|report| report.cleaning_cost).sum();

    Ok(DateRangeReport {
        date_start,
        date_stop,
        dates,
        total_revenue,
        total_cleaning_cost,
    })
}
