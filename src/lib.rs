// Main library file for the hotel front desk

// Core reservation engine
pub mod hotel_data;
pub mod model;
pub mod occupancy;
pub mod pricing;
pub mod schedule;

// Persistence, configuration and the desk operations built on the core
pub mod config;
pub mod desk;
pub mod report_export;
pub mod storage;

// Re-export key types for convenience
pub use config::HotelConfig;
pub use desk::{BookingRequest, DeskError, FrontDesk, Rejection};
pub use hotel_data::{HotelData, HotelError};
pub use model::{
    CouponCode, CouponRedemption, Customer, Refund, Reservation, Room, RoomPrice, RoomType,
};
pub use occupancy::{DateRangeReport, DateReport, RoomOccupancy, RoomReport};
pub use report_export::{ExportError, XmlUtilizationReport};
pub use storage::{Collection, FileStore, HotelStore, StorageError};
