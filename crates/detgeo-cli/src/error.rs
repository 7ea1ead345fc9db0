use detgeo::builders::error::BuildError;
use detgeo::core::io::hits::HitIoError;
use detgeo::core::io::readout_map::ExportError;
use detgeo::core::materials::CatalogError;
use detgeo::core::spec::SpecError;
use detgeo::readout::ReadoutError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Spec(#[from] SpecError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    HitIo(#[from] HitIoError),

    #[error(transparent)]
    Readout(#[from] ReadoutError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),
}
