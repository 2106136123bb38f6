//! Intent catalog: tagged example patterns with canned responses.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// One intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    /// Identifier reported back with replies (e.g. `restaurantes`).
    pub tag: String,
    /// Example user phrasings.
    pub patterns: Vec<String>,
    /// Replies to choose from when the intent matches.
    pub responses: Vec<String>,
}

/// The full set of intents, in priority order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentCatalog {
    pub intents: Vec<Intent>,
}

impl IntentCatalog {
    /// Parse a catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Parse a catalog file, falling back to [`IntentCatalog::builtin`] if it
    /// does not exist.
    pub fn load_or_builtin(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        match Self::load(&path) {
            Err(CatalogError::Io { source, path }) if source.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path, "Intent catalog not found; using built-in catalog");
                Ok(Self::builtin())
            }
            other => other,
        }
    }

    /// Look up an intent by tag.
    pub fn get(&self, tag: &str) -> Option<&Intent> {
        self.intents.iter().find(|intent| intent.tag == tag)
    }

    /// Built-in Bogotá tourism catalog.
    pub fn builtin() -> Self {
        fn intent(tag: &str, patterns: &[&str], responses: &[&str]) -> Intent {
            Intent {
                tag: tag.to_string(),
                patterns: patterns.iter().map(ToString::to_string).collect(),
                responses: responses.iter().map(ToString::to_string).collect(),
            }
        }

        Self {
            intents: vec![
                intent(
                    "lugares_turisticos",
                    &[
                        "¿Qué lugares puedo visitar en la ciudad?",
                        "Recomendaciones turísticas",
                        "¿Qué ver en Bogotá?",
                    ],
                    &[
                        "Puedes visitar Monserrate, el Museo del Oro y la Candelaria.",
                        "Te recomiendo el centro histórico y parques naturales.",
                    ],
                ),
                intent(
                    "restaurantes",
                    &[
                        "¿Dónde puedo comer bien?",
                        "Restaurantes recomendados",
                        "Quiero probar comida típica",
                    ],
                    &[
                        "Puedes probar 'Andrés Carne de Res' o 'Casa Vieja'.",
                        "Te recomiendo restaurantes de comida local como 'El Cielo'.",
                    ],
                ),
                intent(
                    "clima_ciudad",
                    &[
                        "¿Qué clima hace hoy?",
                        "¿Va a llover?",
                        "¿Debo llevar abrigo hoy?",
                    ],
                    &[
                        "Hoy se espera un clima soleado con 23°C.",
                        "Se pronostican lluvias por la tarde, lleva paraguas.",
                    ],
                ),
                intent(
                    "horarios_lugares",
                    &[
                        "¿A qué hora abre el museo?",
                        "Horarios del parque",
                        "¿Hasta qué hora funciona Monserrate?",
                    ],
                    &[
                        "El Museo del Oro abre de 9 a.m. a 5 p.m.",
                        "Monserrate está abierto todos los días hasta las 10 p.m.",
                    ],
                ),
                intent(
                    "transporte_ciudad",
                    &[
                        "¿Cómo me muevo en la ciudad?",
                        "¿Hay transporte público?",
                        "¿Cómo llego al centro?",
                    ],
                    &[
                        "Puedes usar TransMilenio o taxis.",
                        "Te recomiendo Uber o transporte público para llegar al centro.",
                    ],
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_tags() {
        let catalog = IntentCatalog::builtin();
        let tags: Vec<_> = catalog.intents.iter().map(|i| i.tag.as_str()).collect();
        assert_eq!(
            tags,
            [
                "lugares_turisticos",
                "restaurantes",
                "clima_ciudad",
                "horarios_lugares",
                "transporte_ciudad"
            ]
        );
        assert!(catalog.get("restaurantes").is_some());
        assert!(catalog.get("nope").is_none());
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"intents":[{{"tag":"saludo","patterns":["hola"],"responses":["¡Hola!"]}}]}}"#
        )
        .unwrap();

        let catalog = IntentCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.intents.len(), 1);
        assert_eq!(catalog.intents[0].tag, "saludo");
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = IntentCatalog::load_or_builtin(dir.path().join("intents.json")).unwrap();
        assert_eq!(catalog, IntentCatalog::builtin());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = IntentCatalog::load_or_builtin(file.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }
}
