pub mod settings_dto;

pub use settings_dto::{PublicSettingsDto, SizeChartRowDto, UpdateSettingsDto};
