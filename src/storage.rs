// Flat-file persistence: one comma-delimited text file per collection
use crate::hotel_data::{default_room_prices, HotelData};
use crate::model::{CouponCode, CouponRedemption, Customer, Reservation, Room, RoomPrice};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

// Error types for reading and writing the collection files
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Line {line} in {file} is in an invalid format.")]
    InvalidLine { file: &'static str, line: usize },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// Field-level parse failure; the caller attaches file and line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid field: {0}")]
pub struct FieldError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Rooms,
    Reservations,
    Customers,
    RoomPrices,
    Refunds,
    CouponCodes,
    CouponRedemptions,
}

impl Collection {
    pub const ALL: [Collection; 7] = [
        Collection::Rooms,
        Collection::Reservations,
        Collection::Customers,
        Collection::RoomPrices,
        Collection::Refunds,
        Collection::CouponCodes,
        Collection::CouponRedemptions,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            Collection::Rooms => "Rooms.txt",
            Collection::Reservations => "Reservations.txt",
            Collection::Customers => "Customers.txt",
            Collection::RoomPrices => "RoomPrices.txt",
            Collection::Refunds => "Refunds.txt",
            Collection::CouponCodes => "CouponCodes.txt",
            Collection::CouponRedemptions => "CouponRedemption.txt",
        }
    }
}

/// A record that maps to exactly one line of its collection file.
pub trait LineRecord: Sized {
    const FIELD_COUNT: usize;

    fn to_fields(&self) -> Vec<String>;

    fn from_fields(fields: &[&str]) -> Result<Self, FieldError>;
}

const DATE_WRITE_FORMAT: &str = "%-m/%-d/%Y";
const DATE_READ_FORMATS: [&str; 2] = ["%m/%d/%Y", "%Y-%m-%d"];

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_WRITE_FORMAT).to_string()
}

pub fn parse_date(field: &str) -> Result<NaiveDate, FieldError> {
    DATE_READ_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(field, format).ok())
        .ok_or_else(|| FieldError(format!("date {:?}", field)))
}

pub fn format_bool(value: bool) -> String {
    let text = if value { "True" } else { "False" };
    text.to_string()
}

pub fn parse_bool(field: &str) -> Result<bool, FieldError> {
    if field.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if field.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(FieldError(format!("boolean {:?}", field)))
    }
}

fn parse_number<T: std::str::FromStr>(field: &str, what: &str) -> Result<T, FieldError> {
    field
        .trim()
        .parse()
        .map_err(|_| FieldError(format!("{} {:?}", what, field)))
}

fn parse_decimal(field: &str) -> Result<Decimal, FieldError> {
    parse_number(field, "decimal")
}

impl LineRecord for Room {
    const FIELD_COUNT: usize = 2;

    fn to_fields(&self) -> Vec<String> {
        vec![self.room_number.to_string(), self.room_type.to_string()]
    }

    fn from_fields(fields: &[&str]) -> Result<Self, FieldError> {
        Ok(Room {
            room_number: parse_number(fields[0], "room number")?,
            room_type: fields[1]
                .parse()
                .map_err(|e| FieldError(format!("{}", e)))?,
        })
    }
}

impl LineRecord for RoomPrice {
    const FIELD_COUNT: usize = 3;

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.room_type.to_string(),
            self.daily_rate.to_string(),
            self.daily_cleaning_cost.to_string(),
        ]
    }

    fn from_fields(fields: &[&str]) -> Result<Self, FieldError> {
        Ok(RoomPrice {
            room_type: fields[0]
                .parse()
                .map_err(|e| FieldError(format!("{}", e)))?,
            daily_rate: parse_decimal(fields[1])?,
            daily_cleaning_cost: parse_decimal(fields[2])?,
        })
    }
}

impl LineRecord for Customer {
    const FIELD_COUNT: usize = 3;

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.customer_name.clone(),
            self.card_number.to_string(),
            format_bool(self.freq_traveler_status),
        ]
    }

    fn from_fields(fields: &[&str]) -> Result<Self, FieldError> {
        Ok(Customer {
            customer_name: fields[0].to_string(),
            card_number: parse_number(fields[1], "card number")?,
            freq_traveler_status: parse_bool(fields[2])?,
        })
    }
}

// Shared by the reservation and refund files
impl LineRecord for Reservation {
    const FIELD_COUNT: usize = 7;

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.reservation_number.clone(),
            format_date(self.date_start),
            format_date(self.date_stop),
            self.room_number.to_string(),
            self.customer_name.clone(),
            self.payment_confirmation.clone(),
            self.charged_fees.to_string(),
        ]
    }

    fn from_fields(fields: &[&str]) -> Result<Self, FieldError> {
        let date_start = parse_date(fields[1])?;
        let date_stop = parse_date(fields[2])?;
        if date_start > date_stop {
            return Err(FieldError(format!(
                "stop date {} before start date {}",
                fields[2], fields[1]
            )));
        }
        Ok(Reservation {
            reservation_number: fields[0].to_string(),
            date_start,
            date_stop,
            room_number: parse_number(fields[3], "room number")?,
            customer_name: fields[4].to_string(),
            payment_confirmation: fields[5].to_string(),
            charged_fees: parse_decimal(fields[6])?,
        })
    }
}

impl LineRecord for CouponCode {
    const FIELD_COUNT: usize = 2;

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.coupon_code.clone(),
            self.discount_percentage.to_string(),
        ]
    }

    fn from_fields(fields: &[&str]) -> Result<Self, FieldError> {
        Ok(CouponCode {
            coupon_code: fields[0].to_string(),
            discount_percentage: parse_decimal(fields[1])?,
        })
    }
}

impl LineRecord for CouponRedemption {
    const FIELD_COUNT: usize = 2;

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.reservation_number_applied.clone(),
            self.coupon_code_used.clone(),
        ]
    }

    fn from_fields(fields: &[&str]) -> Result<Self, FieldError> {
        Ok(CouponRedemption {
            reservation_number_applied: fields[0].to_string(),
            coupon_code_used: fields[1].to_string(),
        })
    }
}

/// Renders a collection as file contents, one newline-terminated line per record.
pub fn serialize_records<T: LineRecord>(records: &[T]) -> String {
    let mut contents = String::new();
    for record in records {
        contents.push_str(&record.to_fields().join(","));
        contents.push('\n');
    }
    contents
}

/// Parses file contents back into records, skipping blank lines.
///
/// The first malformed line aborts the load, reported with its 1-based number.
pub fn parse_records<T: LineRecord>(
    contents: &str,
    file: &'static str,
) -> Result<Vec<T>, StorageError> {
    let mut records = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        let invalid = || StorageError::InvalidLine {
            file,
            line: index + 1,
        };
        if fields.len() != T::FIELD_COUNT {
            return Err(invalid());
        }
        let record = T::from_fields(&fields).map_err(|e| {
            debug!("{} line {}: {}", file, index + 1, e);
            invalid()
        })?;
        records.push(record);
    }
    Ok(records)
}

pub fn serialize_collection(data: &HotelData, collection: Collection) -> String {
    match collection {
        Collection::Rooms => serialize_records(&data.rooms),
        Collection::Reservations => serialize_records(&data.reservations),
        Collection::Customers => serialize_records(&data.customers),
        Collection::RoomPrices => serialize_records(&data.room_prices),
        Collection::Refunds => serialize_records(&data.refunds),
        Collection::CouponCodes => serialize_records(&data.coupon_codes),
        Collection::CouponRedemptions => serialize_records(&data.coupon_redemptions),
    }
}

// Persistence seam used by the front desk
pub trait HotelStore {
    // Load all seven collections, creating whatever is missing
    fn load(&self) -> Result<HotelData, StorageError>;

    // Overwrite one collection with its current in-memory contents
    fn save(&self, data: &HotelData, collection: Collection) -> Result<(), StorageError>;

    fn save_all(&self, data: &HotelData) -> Result<(), StorageError> {
        for collection in Collection::ALL {
            self.save(data, collection)?;
        }
        Ok(())
    }
}

/// Store backed by a directory holding the seven collection files.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_of(&self, collection: Collection) -> PathBuf {
        self.dir.join(collection.file_name())
    }

    fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StorageError + '_ {
        move |source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    // Missing files are created; the price file starts with the default rates
    fn ensure_file(&self, collection: Collection) -> Result<(), StorageError> {
        let path = self.path_of(collection);
        if path.exists() {
            return Ok(());
        }
        let contents = match collection {
            Collection::RoomPrices => serialize_records(&default_room_prices()),
            _ => String::new(),
        };
        info!("Creating missing collection file {}", path.display());
        fs::write(&path, contents).map_err(Self::io_error(&path))
    }

    fn read(&self, collection: Collection) -> Result<String, StorageError> {
        let path = self.path_of(collection);
        fs::read_to_string(&path).map_err(Self::io_error(&path))
    }
}

impl HotelStore for FileStore {
    fn load(&self) -> Result<HotelData, StorageError> {
        fs::create_dir_all(&self.dir).map_err(Self::io_error(&self.dir))?;
        for collection in Collection::ALL {
            self.ensure_file(collection)?;
        }

        let mut room_prices: Vec<RoomPrice> = parse_records(
            &self.read(Collection::RoomPrices)?,
            Collection::RoomPrices.file_name(),
        )?;
        if room_prices.is_empty() {
            // written back on the next price flush
            warn!("{} is empty, using default room prices", Collection::RoomPrices.file_name());
            room_prices = default_room_prices();
        }

        let data = HotelData {
            rooms: parse_records(&self.read(Collection::Rooms)?, Collection::Rooms.file_name())?,
            room_prices,
            customers: parse_records(
                &self.read(Collection::Customers)?,
                Collection::Customers.file_name(),
            )?,
            reservations: parse_records(
                &self.read(Collection::Reservations)?,
                Collection::Reservations.file_name(),
            )?,
            refunds: parse_records(
                &self.read(Collection::Refunds)?,
                Collection::Refunds.file_name(),
            )?,
            coupon_codes: parse_records(
                &self.read(Collection::CouponCodes)?,
                Collection::CouponCodes.file_name(),
            )?,
            coupon_redemptions: parse_records(
                &self.read(Collection::CouponRedemptions)?,
                Collection::CouponRedemptions.file_name(),
            )?,
        };

        info!(
            "Loaded {} rooms, {} customers, {} reservations from {}",
            data.rooms.len(),
            data.customers.len(),
            data.reservations.len(),
            self.dir.display()
        );
        Ok(data)
    }

    fn save(&self, data: &HotelData, collection: Collection) -> Result<(), StorageError> {
        let path = self.path_of(collection);
        debug!("Writing {}", path.display());
        fs::write(&path, serialize_collection(data, collection)).map_err(Self::io_error(&path))
    }
}
