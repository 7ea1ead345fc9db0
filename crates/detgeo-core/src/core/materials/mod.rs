use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Aggregate state of a material, used only for bookkeeping and export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialState {
    Gas,
    Liquid,
    Solid,
}

/// A resolved material reference: name plus the properties the geometry
/// needs. Densities are in g/cm^3.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub density: f64,
    pub state: MaterialState,
}

struct BuiltinMaterial {
    density: f64,
    state: MaterialState,
}

// Densities follow the PDG / Geant4 NIST values commonly referenced by
// detector description toolkits.
static BUILTIN_MATERIALS: phf::Map<&'static str, BuiltinMaterial> = phf::phf_map! {
    "Air" => BuiltinMaterial { density: 1.205e-3, state: MaterialState::Gas },
    "Vacuum" => BuiltinMaterial { density: 1.0e-25, state: MaterialState::Gas },
    "Silicon" => BuiltinMaterial { density: 2.33, state: MaterialState::Solid },
    "Tungsten" => BuiltinMaterial { density: 19.3, state: MaterialState::Solid },
    "Lead" => BuiltinMaterial { density: 11.35, state: MaterialState::Solid },
    "Iron" => BuiltinMaterial { density: 7.874, state: MaterialState::Solid },
    "Steel235" => BuiltinMaterial { density: 7.85, state: MaterialState::Solid },
    "Copper" => BuiltinMaterial { density: 8.96, state: MaterialState::Solid },
    "Aluminum" => BuiltinMaterial { density: 2.699, state: MaterialState::Solid },
    "Polystyrene" => BuiltinMaterial { density: 1.06, state: MaterialState::Solid },
    "G10" => BuiltinMaterial { density: 1.7, state: MaterialState::Solid },
};

const AIR: &str = "Air";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Material '{0}' declares a non-positive density")]
    NonPositiveDensity(String),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MaterialEntry {
    density: f64,
    #[serde(default = "default_state")]
    state: MaterialState,
}

fn default_state() -> MaterialState {
    MaterialState::Solid
}

/// Resolves material-name strings to material properties.
///
/// Ships with a built-in table of common detector materials and can be
/// extended from a TOML file mapping names to `{ density, state }` tables.
/// Purely a lookup: the builders retain no catalog state.
#[derive(Debug, Clone)]
pub struct MaterialCatalog {
    materials: HashMap<String, Material>,
}

impl Default for MaterialCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterialCatalog {
    pub fn new() -> Self {
        let materials = BUILTIN_MATERIALS
            .entries()
            .map(|(name, m)| {
                (
                    name.to_string(),
                    Material {
                        name: name.to_string(),
                        density: m.density,
                        state: m.state,
                    },
                )
            })
            .collect();
        Self { materials }
    }

    /// Merges user-defined materials from a TOML file. Entries override
    /// built-ins of the same name.
    pub fn extend_from_file(&mut self, path: &Path) -> Result<(), CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let entries: HashMap<String, MaterialEntry> =
            toml::from_str(&content).map_err(|e| CatalogError::Toml {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;
        for (name, entry) in entries {
            if entry.density <= 0.0 {
                return Err(CatalogError::NonPositiveDensity(name));
            }
            self.materials.insert(
                name.clone(),
                Material {
                    name,
                    density: entry.density,
                    state: entry.state,
                },
            );
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }

    /// The envelope filler material, always present.
    pub fn air(&self) -> &Material {
        &self.materials[AIR]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_materials_resolve_by_name() {
        let catalog = MaterialCatalog::new();
        let si = catalog.get("Silicon").unwrap();
        assert_eq!(si.density, 2.33);
        assert_eq!(si.state, MaterialState::Solid);
        assert!(catalog.get("Unobtainium").is_none());
    }

    #[test]
    fn air_is_always_available() {
        let catalog = MaterialCatalog::new();
        assert_eq!(catalog.air().state, MaterialState::Gas);
    }

    #[test]
    fn extension_file_adds_and_overrides_materials() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[Scintillator]\ndensity = 1.032\n\n[Tungsten]\ndensity = 19.25\n"
        )
        .unwrap();

        let mut catalog = MaterialCatalog::new();
        catalog.extend_from_file(file.path()).unwrap();
        assert_eq!(catalog.get("Scintillator").unwrap().density, 1.032);
        assert_eq!(catalog.get("Tungsten").unwrap().density, 19.25);
    }

    #[test]
    fn non_positive_density_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[Foam]\ndensity = 0.0\n").unwrap();

        let mut catalog = MaterialCatalog::new();
        assert!(matches!(
            catalog.extend_from_file(file.path()),
            Err(CatalogError::NonPositiveDensity(_))
        ));
    }
}
