//! Entities used by unit tests that only render SQL.

pub mod person {
    use sea_orm::entity::prelude::*;

    use crate::filtering::SearchField;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "person")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
        pub age: i32,
        pub score: f64,
        pub active: bool,
        pub token: Uuid,
        pub born: Option<Date>,
        pub deleted: bool,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    pub fn search_fields() -> Vec<SearchField<Column>> {
        vec![
            SearchField::integer("id", Column::Id),
            SearchField::text("name", Column::Name),
            SearchField::integer("age", Column::Age),
            SearchField::float("score", Column::Score),
            SearchField::boolean("active", Column::Active),
            SearchField::uuid("token", Column::Token),
            SearchField::date("born", Column::Born),
        ]
    }
}
