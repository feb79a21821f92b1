pub mod commands;

use actionstatus_app_core::Platform;
use clap::ValueEnum;

#[derive(ValueEnum, Clone, Debug, Copy)]
pub enum CliPlatform {
    Mac,
    Ios,
    Tv,
}

impl From<CliPlatform> for Platform {
    fn from(p: CliPlatform) -> Self {
        match p {
            CliPlatform::Mac => Platform::Mac,
            CliPlatform::Ios => Platform::Touch,
            CliPlatform::Tv => Platform::Tv,
        }
    }
}
