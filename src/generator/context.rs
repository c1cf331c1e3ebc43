use crate::naming::{singularize, table_name, to_camel_case, to_studly_case};
use crate::schema::FieldMetaMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Route file a resource route is registered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteFile {
    #[default]
    Api,
    Web,
}

impl RouteFile {
    pub fn as_str(self) -> &'static str {
        match self {
            RouteFile::Api => "api",
            RouteFile::Web => "web",
        }
    }
}

impl fmt::Display for RouteFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the generators need to scaffold one entity.
#[derive(Debug, Clone)]
pub struct CrudContext {
    /// Name as given by the user (`blog post`, `BlogPost`, `blog_post`)
    pub name: String,
    /// Class name (`BlogPost`)
    pub studly: String,
    /// Sub-namespace / directory for controller, request, resource and enums
    pub group: String,
    /// Table name (`blog_posts`)
    pub table: String,
    pub route: RouteFile,
    pub fields: FieldMetaMap,
}

impl CrudContext {
    /// Context with the table derived from `name` and the given group.
    pub fn new(name: &str, group: &str, fields: FieldMetaMap) -> Self {
        let studly = to_studly_case(name);
        CrudContext {
            name: name.to_string(),
            table: table_name(&studly),
            studly,
            group: to_studly_case(group),
            route: RouteFile::default(),
            fields,
        }
    }

    /// Override the derived table name.
    pub fn with_table(mut self, table: &str) -> Self {
        self.table = table.to_string();
        self
    }

    pub fn with_route(mut self, route: RouteFile) -> Self {
        self.route = route;
        self
    }

    /// Route parameter name bound to the model (`blog_post`).
    pub fn route_parameter(&self) -> String {
        singularize(&self.table)
    }

    /// PHP variable name for one record (`blogPost`).
    pub fn variable(&self) -> String {
        to_camel_case(&self.route_parameter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_derives_names() {
        let ctx = CrudContext::new("blog post", "data entry", FieldMetaMap::new());
        assert_eq!(ctx.studly, "BlogPost");
        assert_eq!(ctx.table, "blog_posts");
        assert_eq!(ctx.group, "DataEntry");
        assert_eq!(ctx.route, RouteFile::Api);
        assert_eq!(ctx.route_parameter(), "blog_post");
        assert_eq!(ctx.variable(), "blogPost");
    }

    #[test]
    fn test_context_overrides() {
        let ctx = CrudContext::new("Category", "Shop", FieldMetaMap::new())
            .with_table("shop_categories")
            .with_route(RouteFile::Web);
        assert_eq!(ctx.table, "shop_categories");
        assert_eq!(ctx.route_parameter(), "shop_category");
        assert_eq!(ctx.route.as_str(), "web");
    }
}
