use serde::{Deserialize, Serialize};

use crate::filter::Filterable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<f64>,
    pub company_handle: String,
}

impl Filterable for Job {
    fn text_field(&self, field: &str) -> Option<&str> {
        match field {
            "title" => Some(&self.title),
            "company_handle" => Some(&self.company_handle),
            _ => None,
        }
    }

    fn numeric_field(&self, field: &str) -> Option<f64> {
        match field {
            "salary" => self.salary.map(f64::from),
            "equity" => self.equity,
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub salary: Option<i32>,
    #[serde(default)]
    pub equity: Option<f64>,
    pub company_handle: String,
}
