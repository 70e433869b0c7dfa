use serde::{Deserialize, Serialize};
use std::fmt;

/// Page element the extractor looks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Description,
    Price,
    BuyButton,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Description => "description",
            Role::Price => "price",
            Role::BuyButton => "buy_button",
        };
        f.write_str(name)
    }
}

/// How to find an element on the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locator {
    Css(String),
    Xpath(String),
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css(selector.into())
    }

    pub fn xpath(expression: impl Into<String>) -> Self {
        Locator::Xpath(expression.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Locator::Css(s) | Locator::Xpath(s) => s,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(s) => write!(f, "css `{}`", s),
            Locator::Xpath(s) => write!(f, "xpath `{}`", s),
        }
    }
}

/// Locators for every role, keyed by what the element means on a product page.
///
/// Defaults follow the Growth Supplements product page markup. Attribute
/// selectors are used instead of class selectors so the class attribute has
/// to match exactly, like `@class="..."` in XPath.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorMap {
    pub description: Locator,
    pub price: Locator,
    pub buy_button: Locator,
}

impl SelectorMap {
    pub fn get(&self, role: Role) -> &Locator {
        match role {
            Role::Description => &self.description,
            Role::Price => &self.price,
            Role::BuyButton => &self.buy_button,
        }
    }
}

impl Default for SelectorMap {
    fn default() -> Self {
        Self {
            description: Locator::css(r#"h1[class="topoDetalhe-boxRight-nome"]"#),
            price: Locator::css(r#"span[class="topoDetalhe-boxRight-precoDe show-for-large"]"#),
            buy_button: Locator::css(
                r#"div[class="botao-de-compra"] button[class="botaoComprar"]"#,
            ),
        }
    }
}
