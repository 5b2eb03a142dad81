use clap::Parser;

/// Calendar-date format used when exchanging dates with operators.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Parser)]
#[command(name = "filetrail", author = "filetrail", version = "0.1", about = "Track physical document files and their custody movements", long_about = None)]
pub struct StartArgs {
    /// Database URL.
    #[arg(short, long)]
    db_url: Option<String>,

    /// RUST_LOG string to use as the env filter.
    #[arg(short, long)]
    log: Option<String>,
}

/// Implement a getter method on [StartArgs], using the `$var` environment variable as a fallback
/// and either panic or default if neither the argument nor the environment variable is set.
macro_rules! arg {
    ($id:ident, $var:literal, panic $msg:literal) => {
        impl StartArgs {
            pub fn $id(&self) -> String {
                match &self.$id {
                    Some(val) => val.to_string(),
                    None => match std::env::var($var) {
                        Ok(val) => val,
                        Err(_) => panic!($msg),
                    },
                }
            }
        }
    };
    ($id:ident, $var:literal, default $value:expr) => {
        impl StartArgs {
            pub fn $id(&self) -> String {
                match &self.$id {
                    Some(val) => val.to_string(),
                    None => match std::env::var($var) {
                        Ok(val) => val,
                        Err(_) => $value,
                    },
                }
            }
        }
    };
}

arg!(db_url, "DATABASE_URL", panic "Database url not found; Pass --db-url or set DATABASE_URL");
arg!(log,    "RUST_LOG",     default "info".to_string());
