//! Request parameters shared by the HTML and JSON chart routes.

use crate::error::{WebError, WebResult};
use sdg_data::{Selection, CATALOG};
use serde::Deserialize;

/// Parameters of `/visualize` and `/api/charts`.
///
/// `entities` and `periods` are comma-separated lists. Blank values count as
/// absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartQuery {
    /// Catalog category key, used for the indicator label.
    pub category: Option<String>,
    /// Indicator code. Required.
    pub indicator: Option<String>,
    /// Entities to keep, e.g. `Fiji,Tonga`.
    pub entities: Option<String>,
    /// Periods to keep, e.g. `2019,2020`.
    pub periods: Option<String>,
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

fn split_list(value: Option<&String>) -> Vec<&str> {
    non_blank(value)
        .map(|list| list.split(',').collect())
        .unwrap_or_default()
}

impl ChartQuery {
    /// The trimmed indicator code.
    pub fn indicator(&self) -> WebResult<&str> {
        non_blank(self.indicator.as_ref()).ok_or(WebError::MissingParameter("indicator"))
    }

    /// Builds the pipeline selection these parameters describe.
    pub fn selection(&self) -> WebResult<Selection> {
        let indicator = self.indicator()?;
        Ok(Selection::new(indicator)
            .with_entities(split_list(self.entities.as_ref()))
            .with_periods(split_list(self.periods.as_ref())))
    }

    /// The given category, or the one the catalog files the indicator under.
    pub fn category(&self) -> Option<String> {
        non_blank(self.category.as_ref())
            .map(str::to_string)
            .or_else(|| {
                let code = self.indicator().ok()?;
                CATALOG.category_of(code).map(str::to_string)
            })
    }

    /// Title of the resolved category, when the catalog knows it.
    pub fn category_title(&self) -> Option<&'static str> {
        self.category()
            .and_then(|key| CATALOG.category(&key))
            .map(|category| category.title)
    }

    /// Display label for the indicator. Falls back to the code itself.
    pub fn label(&self) -> WebResult<String> {
        let code = self.indicator()?;
        Ok(match self.category() {
            Some(category) => CATALOG.label_for(&category, code),
            None => CATALOG.find_label(code).unwrap_or(code).to_string(),
        })
    }
}
