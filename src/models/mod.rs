use serde::{Deserialize, Serialize};
use std::fmt;

/// Column headers of the output table, in write order
pub const COLUMNS: [&str; 5] = [
    "Descrição do Item",
    "Preço",
    "Data Hora",
    "Disponível para Compra?",
    "Link do Produto",
];

/// Whether the product could be bought when the page was checked
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Availability {
    #[serde(rename = "SIM")]
    Available,
    #[serde(rename = "NÃO")]
    Unavailable,
}

impl Availability {
    pub fn from_presence(present: bool) -> Self {
        if present {
            Availability::Available
        } else {
            Availability::Unavailable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Available => "SIM",
            Availability::Unavailable => "NÃO",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One price check of one product page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductRecord {
    pub description: String,
    /// Decimal text, see `format::format_price`
    pub price: String,
    /// `DD/MM/YYYY HH:MM:SS`, local time
    pub captured_at: String,
    pub availability: Availability,
    pub url: String,
}

impl ProductRecord {
    /// Cell values in `COLUMNS` order
    pub fn to_row(&self) -> [String; 5] {
        [
            self.description.clone(),
            self.price.clone(),
            self.captured_at.clone(),
            self.availability.to_string(),
            self.url.clone(),
        ]
    }
}
