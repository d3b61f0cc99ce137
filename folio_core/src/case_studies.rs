//! # Case Studies
//!
//! Static portfolio content rendered inside the project dialog. The built-in
//! catalog holds six records keyed by project id; project cards in the page
//! reference them through their `data-project` attribute.
//!
//! A catalog with the same record shape can also be loaded from JSON, which is
//! how an external content source would replace the built-in table.
//!
//! ## Example
//!
//! ```rust
//! use folio_core::case_studies::CaseStudyCatalog;
//!
//! let catalog = CaseStudyCatalog::builtin();
//! assert_eq!(catalog.len(), 6);
//! assert!(catalog.get("ecommerce").is_some());
//! assert!(catalog.get("does-not-exist").is_none());
//! ```

use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{FolioError, FolioResult};

/// One portfolio project, as shown in the case-study dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseStudy {
    /// Key referenced by project cards
    pub id: String,
    pub title: String,
    pub client: String,
    pub duration: String,
    pub role: String,
    pub objective: String,
    pub problem: String,
    /// Ordered process steps
    pub process: Vec<String>,
    pub solution: String,
    /// Ordered outcome highlights
    pub results: Vec<String>,
    pub image_url: String,
}

/// Immutable lookup table of case studies, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseStudyCatalog {
    studies: Vec<CaseStudy>,
}

/// Element id of the optional case-study block in the host page; its JSON
/// array replaces the built-in set.
pub const CATALOG_ELEMENT_ID: &str = "folio-case-studies";

static BUILTIN: Lazy<CaseStudyCatalog> = Lazy::new(|| CaseStudyCatalog {
    studies: builtin_studies(),
});

impl CaseStudyCatalog {
    /// Build a catalog, rejecting empty or repeated ids.
    pub fn new(studies: Vec<CaseStudy>) -> FolioResult<Self> {
        let mut seen = HashSet::new();
        for study in &studies {
            if study.id.trim().is_empty() {
                return Err(FolioError::invalid_setting(
                    "id",
                    study.title.clone(),
                    "Case study id cannot be empty",
                ));
            }
            if !seen.insert(study.id.as_str()) {
                return Err(FolioError::duplicate_project(study.id.clone()));
            }
        }
        Ok(CaseStudyCatalog { studies })
    }

    /// Parse a JSON array of case studies.
    pub fn from_json(json: &str) -> FolioResult<Self> {
        let studies: Vec<CaseStudy> = serde_json::from_str(json)?;
        Self::new(studies)
    }

    /// The six projects that ship with the site.
    pub fn builtin() -> &'static CaseStudyCatalog {
        &BUILTIN
    }

    /// Look up a case study by project id.
    pub fn get(&self, id: &str) -> Option<&CaseStudy> {
        self.studies.iter().find(|s| s.id == id)
    }

    /// Like [`get`](Self::get), but reports unknown ids as an error.
    pub fn require(&self, id: &str) -> FolioResult<&CaseStudy> {
        self.get(id).ok_or_else(|| FolioError::unknown_project(id))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.studies.iter().map(|s| s.id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CaseStudy> {
        self.studies.iter()
    }

    pub fn len(&self) -> usize {
        self.studies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.studies.is_empty()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn builtin_studies() -> Vec<CaseStudy> {
    vec![
        CaseStudy {
            id: "ecommerce".to_string(),
            title: "Rediseño de tienda online".to_string(),
            client: "Moda Sostenible S.L.".to_string(),
            duration: "4 meses".to_string(),
            role: "Diseñadora UX/UI principal".to_string(),
            objective: "Aumentar la conversión de la tienda y reducir el abandono del carrito en dispositivos móviles.".to_string(),
            problem: "El 70% del tráfico llegaba desde el móvil, pero el proceso de compra tenía siete pasos y formularios pensados para escritorio.".to_string(),
            process: strings(&[
                "Análisis de métricas y mapas de calor",
                "Entrevistas con 12 clientes habituales",
                "Mapa del recorrido de compra",
                "Prototipos de baja y alta fidelidad",
                "Pruebas de usabilidad en dos iteraciones",
            ]),
            solution: "Un checkout de tres pasos con pago exprés, autocompletado de direcciones y un carrito persistente entre dispositivos.".to_string(),
            results: strings(&[
                "+38% en tasa de conversión móvil",
                "-45% en abandono del carrito",
                "Tiempo medio de compra reducido a 2 minutos",
            ]),
            image_url: "images/projects/ecommerce.jpg".to_string(),
        },
        CaseStudy {
            id: "fintech".to_string(),
            title: "App de finanzas personales".to_string(),
            client: "Ahorra+".to_string(),
            duration: "6 meses".to_string(),
            role: "Diseño de producto".to_string(),
            objective: "Ayudar a usuarios jóvenes a entender y controlar sus gastos mensuales.".to_string(),
            problem: "Los usuarios abrían la app una vez y no volvían: los gráficos eran difíciles de leer y no ofrecían acciones concretas.".to_string(),
            process: strings(&[
                "Estudio diario con 20 participantes",
                "Definición de arquetipos de usuario",
                "Taller de ideación con el equipo técnico",
                "Sistema de diseño accesible",
                "Lanzamiento gradual con pruebas A/B",
            ]),
            solution: "Un resumen semanal en lenguaje claro, objetivos de ahorro visuales y alertas de gasto configurables.".to_string(),
            results: strings(&[
                "Retención a 30 días del 18% al 41%",
                "4,7 estrellas en las tiendas de aplicaciones",
                "+60% de usuarios con un objetivo de ahorro activo",
            ]),
            image_url: "images/projects/fintech.jpg".to_string(),
        },
        CaseStudy {
            id: "salud".to_string(),
            title: "Portal de citas médicas".to_string(),
            client: "Clínica Vida".to_string(),
            duration: "3 meses".to_string(),
            role: "Investigación UX y diseño de interacción".to_string(),
            objective: "Permitir que los pacientes reserven, cambien y cancelen citas sin llamar por teléfono.".to_string(),
            problem: "La centralita recibía más de 400 llamadas diarias para gestiones que podían resolverse en línea.".to_string(),
            process: strings(&[
                "Observación en recepción durante una semana",
                "Clasificación de motivos de llamada",
                "Arquitectura de información del portal",
                "Prototipo navegable validado con pacientes mayores",
            ]),
            solution: "Un portal con reserva en tres pasos, recordatorios por SMS y textos de gran tamaño con alto contraste.".to_string(),
            results: strings(&[
                "-52% de llamadas a la centralita",
                "65% de las citas gestionadas en línea",
                "Cumplimiento del nivel AA de accesibilidad",
            ]),
            image_url: "images/projects/salud.jpg".to_string(),
        },
        CaseStudy {
            id: "educacion".to_string(),
            title: "Plataforma de aprendizaje en línea".to_string(),
            client: "Academia Aprende".to_string(),
            duration: "5 meses".to_string(),
            role: "Diseñadora UX/UI".to_string(),
            objective: "Mejorar la finalización de cursos en una plataforma de formación para adultos.".to_string(),
            problem: "Solo el 12% de los alumnos terminaba los cursos; la navegación entre lecciones era confusa y no había sensación de progreso.".to_string(),
            process: strings(&[
                "Encuestas a 300 alumnos",
                "Análisis competitivo de cinco plataformas",
                "Rediseño del reproductor de lecciones",
                "Pruebas de guerrilla con prototipos en papel",
                "Iteración con datos de uso reales",
            ]),
            solution: "Rutas de aprendizaje con hitos, un reproductor que recuerda el punto exacto y resúmenes descargables por lección.".to_string(),
            results: strings(&[
                "Finalización de cursos del 12% al 34%",
                "+25% en tiempo medio por sesión",
                "NPS de 21 a 48",
            ]),
            image_url: "images/projects/educacion.jpg".to_string(),
        },
        CaseStudy {
            id: "viajes".to_string(),
            title: "Buscador de viajes sostenibles".to_string(),
            client: "EcoRutas".to_string(),
            duration: "2 meses".to_string(),
            role: "Diseño UI y prototipado".to_string(),
            objective: "Mostrar el impacto ambiental de cada opción de viaje sin entorpecer la búsqueda.".to_string(),
            problem: "Los datos de emisiones existían, pero los usuarios los ignoraban porque aparecían en una pestaña aparte.".to_string(),
            process: strings(&[
                "Revisión de estudios sobre comportamiento sostenible",
                "Exploración de diez formas de visualizar emisiones",
                "Pruebas de preferencia con 40 usuarios",
                "Especificación de componentes para desarrollo",
            ]),
            solution: "Etiquetas de impacto integradas en cada resultado y un filtro de \"menor huella\" visible por defecto.".to_string(),
            results: strings(&[
                "+30% de reservas en opciones de menor impacto",
                "Sin pérdida en la tasa de conversión",
                "Caso destacado en un congreso de diseño",
            ]),
            image_url: "images/projects/viajes.jpg".to_string(),
        },
        CaseStudy {
            id: "restaurante".to_string(),
            title: "Pedidos en mesa para restaurantes".to_string(),
            client: "Grupo Sabores".to_string(),
            duration: "3 meses".to_string(),
            role: "Diseñadora de servicio".to_string(),
            objective: "Reducir las esperas en hora punta permitiendo pedir y pagar desde la mesa.".to_string(),
            problem: "En hora punta los clientes esperaban una media de 15 minutos para pedir y otros 10 para pagar.".to_string(),
            process: strings(&[
                "Blueprint del servicio en tres locales",
                "Entrevistas con camareros y cocina",
                "Prototipo web accesible mediante código QR",
                "Piloto de cuatro semanas en un local",
            ]),
            solution: "Una carta web con pedido directo a cocina, división de cuenta y pago sin esperar al camarero.".to_string(),
            results: strings(&[
                "-40% en tiempo de espera",
                "+15% en ticket medio",
                "Implantado en los doce locales del grupo",
            ]),
            image_url: "images/projects/restaurante.jpg".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_has_six_unique_projects() {
        let catalog = CaseStudyCatalog::builtin();
        assert_eq!(catalog.len(), 6);
        let ids: HashSet<&str> = catalog.ids().collect();
        assert_eq!(ids.len(), 6);
        // Passes its own constructor checks
        assert!(CaseStudyCatalog::new(catalog.iter().cloned().collect()).is_ok());
    }

    #[test]
    fn test_builtin_records_are_complete() {
        for study in CaseStudyCatalog::builtin().iter() {
            assert!(!study.title.is_empty(), "{} has no title", study.id);
            assert!(!study.process.is_empty(), "{} has no process", study.id);
            assert!(!study.results.is_empty(), "{} has no results", study.id);
            assert!(!study.image_url.is_empty(), "{} has no image", study.id);
        }
    }

    #[test]
    fn test_unknown_id() {
        let catalog = CaseStudyCatalog::builtin();
        assert!(catalog.get("robotica").is_none());
        assert_eq!(
            catalog.require("robotica").unwrap_err(),
            FolioError::unknown_project("robotica")
        );
    }

    #[test]
    fn test_json_catalog() {
        let json = serde_json::to_string(CaseStudyCatalog::builtin()).unwrap();
        let parsed = CaseStudyCatalog::from_json(&json).unwrap();
        assert_eq!(&parsed, CaseStudyCatalog::builtin());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let study = CaseStudyCatalog::builtin().get("salud").unwrap().clone();
        let err = CaseStudyCatalog::new(vec![study.clone(), study]).unwrap_err();
        assert_eq!(err, FolioError::duplicate_project("salud"));
    }

    #[test]
    fn test_empty_id_rejected() {
        let mut study = CaseStudyCatalog::builtin().get("viajes").unwrap().clone();
        study.id = "  ".to_string();
        let err = CaseStudyCatalog::new(vec![study]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SETTING");
    }
}
