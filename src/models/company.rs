use serde::{Deserialize, Serialize};

use crate::filter::Filterable;

/// Canonical company shape: `{ handle, name, description, numEmployees, logoUrl }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl Filterable for Company {
    fn text_field(&self, field: &str) -> Option<&str> {
        match field {
            "handle" => Some(&self.handle),
            "name" => Some(&self.name),
            "description" => Some(&self.description),
            "logoUrl" => self.logo_url.as_deref(),
            _ => None,
        }
    }

    fn numeric_field(&self, field: &str) -> Option<f64> {
        match field {
            "numEmployees" => self.num_employees.map(f64::from),
            _ => None,
        }
    }
}

/// A job as listed under its company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyJob {
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    pub jobs: Vec<CompanyJob>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub num_employees: Option<i32>,
    #[serde(default)]
    pub logo_url: Option<String>,
}
