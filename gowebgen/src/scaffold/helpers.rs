//! Naming helpers for code generation
//!
//! Naming conventions, ID-type lookup and other small derivations the
//! templates need. The model-name default strips one trailing `s` and
//! nothing else; irregular plurals are not handled.

use convert_case::{Case, Casing};

/// Naming and lookup helpers used by the generators
pub struct TemplateHelpers;

impl TemplateHelpers {
    /// Go type of the primary key for a database type
    ///
    /// # Examples
    ///
    /// ```
    /// # use gowebgen::scaffold::helpers::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::id_type("mysql"), "uint");
    /// assert_eq!(TemplateHelpers::id_type("oracle"), "int64");
    /// assert_eq!(TemplateHelpers::id_type("sqlite"), "int");
    /// assert_eq!(TemplateHelpers::id_type("unknown"), "uint");
    /// ```
    #[must_use]
    pub fn id_type(db_type: &str) -> &'static str {
        match db_type {
            "oracle" => "int64",
            "sqlite" => "int",
            // mysql, postgres, sqlserver and anything unrecognized
            _ => "uint",
        }
    }

    /// Conventional port for a database type
    ///
    /// # Examples
    ///
    /// ```
    /// # use gowebgen::scaffold::helpers::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::default_db_port("postgres"), "5432");
    /// assert_eq!(TemplateHelpers::default_db_port("sqlite"), "");
    /// ```
    #[must_use]
    pub fn default_db_port(db_type: &str) -> &'static str {
        match db_type {
            "postgres" => "5432",
            "sqlserver" => "1433",
            "oracle" => "1521",
            "sqlite" => "",
            _ => "3306",
        }
    }

    /// Default model name for a table
    ///
    /// # Examples
    ///
    /// ```
    /// # use gowebgen::scaffold::helpers::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::default_model_name("users"), "User");
    /// assert_eq!(TemplateHelpers::default_model_name("data"), "Data");
    /// ```
    #[must_use]
    pub fn default_model_name(table_name: &str) -> String {
        let capitalized = Self::upper_first(table_name);
        capitalized
            .strip_suffix('s')
            .map_or_else(|| capitalized.clone(), str::to_string)
    }

    /// Default module name for a model
    ///
    /// # Examples
    ///
    /// ```
    /// # use gowebgen::scaffold::helpers::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::default_module_name("OrderItem"), "orderItem");
    /// ```
    #[must_use]
    pub fn default_module_name(model_name: &str) -> String {
        Self::lower_first(model_name)
    }

    /// Exported Go identifier for a column name
    ///
    /// # Examples
    ///
    /// ```
    /// # use gowebgen::scaffold::helpers::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_go_name("created_at"), "CreatedAt");
    /// assert_eq!(TemplateHelpers::to_go_name("amount"), "Amount");
    /// ```
    #[must_use]
    pub fn to_go_name(name: &str) -> String {
        name.to_case(Case::Pascal)
    }

    /// Convert string to `snake_case`
    ///
    /// # Examples
    ///
    /// ```
    /// # use gowebgen::scaffold::helpers::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_snake_case("createdAt"), "created_at");
    /// ```
    #[must_use]
    pub fn to_snake_case(input: &str) -> String {
        input.to_case(Case::Snake)
    }

    /// Upper-case the first character, leaving the rest untouched
    #[must_use]
    pub fn upper_first(input: &str) -> String {
        let mut chars = input.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }

    /// Lower-case the first character, leaving the rest untouched
    #[must_use]
    pub fn lower_first(input: &str) -> String {
        let mut chars = input.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_lowercase().chain(chars).collect()
        })
    }
}
