use std::path::Path;

use anyhow::{Result, bail};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::util::read_json;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PageMargins {
    pub top: f64,
    pub bottom: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TrimMargins {
    pub first: PageMargins,
    pub middle: PageMargins,
    pub last: PageMargins,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize, ValueEnum, Default)]
#[serde(rename_all = "snake_case")]
pub enum ColumnOrder {
    #[default]
    PerPage,
    PerDocument,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub y_tolerance: f64,
    pub margins: TrimMargins,
    pub sidebar_x: Option<f64>,
    pub split_x: Option<f64>,
    pub split_min_distinct_x: usize,
    pub split_max_gaps: usize,
    pub split_min_gap: f64,
    pub split_min_fraction: f64,
    pub split_max_fraction: f64,
    pub anchor_phrases: Vec<String>,
    pub anchor_padding: f64,
    pub column_order: ColumnOrder,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            y_tolerance: 3.0,
            margins: TrimMargins::default(),
            sidebar_x: Some(200.0),
            split_x: None,
            split_min_distinct_x: 10,
            split_max_gaps: 40,
            split_min_gap: 25.0,
            split_min_fraction: 0.35,
            split_max_fraction: 0.90,
            anchor_phrases: to_strings(&[
                "ordenar por",
                "creá tu cuenta",
                "sort by",
                "create your account",
            ]),
            anchor_padding: 4.0,
            column_order: ColumnOrder::PerPage,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub exchange_rate: f64,
    pub year_km_window: usize,
    pub location_window: usize,
    pub model_lookback: usize,
    pub trailing_window: usize,
    pub noise_phrases: Vec<String>,
    pub noise_lines: Vec<String>,
    pub vendor_words: Vec<String>,
    pub low_information_tokens: Vec<String>,
    pub brands: Vec<String>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            exchange_rate: 1500.0,
            year_km_window: 12,
            location_window: 20,
            model_lookback: 30,
            trailing_window: 25,
            noise_phrases: to_strings(&[
                "cupones",
                "supermercado",
                "vender",
                "ayuda",
                "mis compras",
                "favoritos",
                "creá tu cuenta",
                "ingresá",
                "categorías",
                "ofertas",
                "guardar esta búsqueda",
                "ordenar por",
                "más relevantes",
                "mostrar más",
                "tiendas oficiales",
                "ubicación",
                "modelo",
                "versiones",
                "kilómetros",
                "pago",
                "transmisión",
                "dirección",
                "detalles de la publicación",
                "otras personas buscaron",
                "enviar a",
                "cómo cuidamos tu privacidad",
                "información al usuario",
                "defensa del consumidor",
                "accesibilidad",
                "afiliados",
                "centro de privacidad",
                "consultar más",
                "anterior",
                "siguiente",
                "publicados hoy",
                "búsquedas relacionadas",
                "resultados",
                "autos, motos",
                "camionetas",
                "anticipo de",
            ]),
            noise_lines: to_strings(&["vehículo validado"]),
            vendor_words: to_strings(&[
                "grupo",
                "autos",
                "automotores",
                "motors",
                "motor",
                "srl",
                "sa",
                "usados",
                "concesionaria",
                "taraborelli",
                "chamonix",
                "motormax",
                "icars",
                "autocity",
                "diaz",
                "meucci",
                "merak",
                "rs",
            ]),
            low_information_tokens: to_strings(&[
                "at", "mt", "cvt", "aut", "automatico", "automatica", "manual", "secuencial",
                "tiptronic", "dsg", "4x2", "4x4", "awd", "turbo", "nafta", "diesel", "gnc",
                "full", "base",
            ]),
            brands: to_strings(&[
                "Alfa Romeo",
                "Audi",
                "BAIC",
                "BMW",
                "BYD",
                "Changan",
                "Chery",
                "Chevrolet",
                "Chrysler",
                "Citroën",
                "D.S.",
                "Daihatsu",
                "Dodge",
                "Ferrari",
                "Fiat",
                "Ford",
                "GMC",
                "GWM",
                "Honda",
                "Hyundai",
                "Isuzu",
                "Iveco",
                "JAC",
                "Jaguar",
                "Jeep",
                "Kia",
                "Lancia",
                "Land Rover",
                "Lexus",
                "Mazda",
                "Mercedes-Benz",
                "MG",
                "Mini",
                "Mitsubishi",
                "Nissan",
                "Opel",
                "Peugeot",
                "Porsche",
                "RAM",
                "Range Rover",
                "Renault",
                "Seat",
                "SsangYong",
                "Subaru",
                "Suzuki",
                "SWM",
                "Toyota",
                "Volkswagen",
                "Volvo",
            ]),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PipelineConfig {
    pub layout: LayoutConfig,
    pub extract: ExtractConfig,
}

impl PipelineConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => read_json::<Self>(path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.extract.exchange_rate.is_finite() && self.extract.exchange_rate > 0.0) {
            bail!(
                "exchange rate must be a positive number, got {}",
                self.extract.exchange_rate
            );
        }
        if self.layout.y_tolerance < 0.0 {
            bail!("y tolerance must not be negative");
        }
        if self.layout.split_min_fraction >= self.layout.split_max_fraction {
            bail!(
                "split fractions are inverted: {} >= {}",
                self.layout.split_min_fraction,
                self.layout.split_max_fraction
            );
        }
        Ok(())
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}
