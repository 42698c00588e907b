use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hotel_desk::occupancy::{date_range_report, reservations_during, unreserved_room_numbers};
use hotel_desk::{HotelData, Reservation, Room, RoomType};
use rand::{thread_rng, Rng};
use rust_decimal::Decimal;

fn first_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

// A hotel with `rooms` rooms and a few random stays per room over a year
fn random_hotel(rooms: u32) -> HotelData {
    let mut rng = thread_rng();
    let mut data = HotelData::with_default_prices();

    for room_number in 1..=rooms {
        data.rooms.push(Room {
            room_number,
            room_type: RoomType::ALL[rng.gen_range(0..RoomType::ALL.len())],
        });

        let mut offset = 0u64;
        while offset < 365 {
            offset += rng.gen_range(0..10);
            let length = rng.gen_range(0..7);
            let date_start = first_day() + Days::new(offset);
            let date_stop = date_start + Days::new(length);
            data.reservations.push(Reservation {
                reservation_number: format!("{}-{}", room_number, offset),
                date_start,
                date_stop,
                room_number,
                customer_name: format!("Guest {}", room_number),
                payment_confirmation: "bench".to_string(),
                charged_fees: Decimal::from(rng.gen_range(100..5000)),
            });
            offset += length + 1;
        }
    }
    data
}

pub fn occupancy_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("utilization_report");

    for rooms in [10u32, 50, 200].iter() {
        let data = random_hotel(*rooms);
        let date_stop = first_day() + Days::new(30);

        group.bench_with_input(BenchmarkId::from_parameter(rooms), &data, |b, data| {
            b.iter(|| date_range_report(black_box(data), first_day(), date_stop).unwrap());
        });
    }

    group.finish();
}

pub fn availability_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("available_rooms");

    for rooms in [10u32, 50, 200].iter() {
        let data = random_hotel(*rooms);
        let date_stop = first_day() + Days::new(7);

        group.bench_with_input(BenchmarkId::from_parameter(rooms), &data, |b, data| {
            b.iter(|| {
                let taken = reservations_during(black_box(data), first_day(), date_stop);
                unreserved_room_numbers(data, &taken)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, occupancy_benchmark, availability_benchmark);
criterion_main!(benches);
