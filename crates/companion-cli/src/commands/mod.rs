pub mod clear_api_key;
pub mod context;
pub mod init_settings;
pub mod inspect;
pub mod path;
