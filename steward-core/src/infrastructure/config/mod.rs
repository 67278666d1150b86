// steward-core/src/infrastructure/config/mod.rs

pub mod governance;

pub use governance::{
    ALTERNATE_CONFIG_FILENAMES, DEFAULT_CONFIG_FILENAME, create_default_config_file,
    find_config_file, load_config, load_config_from_file,
};
