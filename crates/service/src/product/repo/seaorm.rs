use sea_orm::{DatabaseConnection, EntityTrait};

use crate::errors::ServiceError;
use crate::product::domain::{NewProduct, Product, ProductFilter};
use crate::product::repository::{Backend, ProductRepository};
use models::product;

pub struct SeaOrmProductRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl ProductRepository for SeaOrmProductRepository {
    fn backend(&self) -> Backend { Backend::MySql }

    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, ServiceError> {
        product::filtered(filter.category(), filter.search())
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn get(&self, id: i64) -> Result<Option<Product>, ServiceError> {
        product::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn create(&self, input: NewProduct) -> Result<Product, ServiceError> {
        let res = product::Entity::insert(input.to_active_model())
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(input.into_product(res.last_insert_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, QueryTrait, Transaction, Value};
    use std::collections::BTreeMap;

    fn laptop() -> Product {
        Product {
            id: 1,
            name: "Laptop".into(),
            price: Decimal::new(99999, 2),
            category: "Electronics".into(),
            stock: 50,
            description: Some(String::new()),
        }
    }

    #[tokio::test]
    async fn list_sends_filtered_select() -> Result<(), anyhow::Error> {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_results([vec![laptop()]])
            .into_connection();
        let repo = SeaOrmProductRepository::new(db);

        let filter = ProductFilter::new(Some("Electronics"), Some("Lap"));
        let rows = repo.list(&filter).await?;
        assert_eq!(rows, vec![laptop()]);

        let expected = product::filtered(Some("Electronics"), Some("Lap")).build(DatabaseBackend::MySql);
        assert_eq!(repo.db.into_transaction_log(), vec![Transaction::one(expected)]);
        Ok(())
    }

    #[tokio::test]
    async fn list_keeps_rows_with_null_description() -> Result<(), anyhow::Error> {
        let book: BTreeMap<&str, Value> = BTreeMap::from([
            ("id", 3i64.into()),
            ("name", "Book".into()),
            ("price", Decimal::new(1999, 2).into()),
            ("category", "Books".into()),
            ("stock", 200i32.into()),
            ("description", Value::String(None)),
        ]);
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_results([vec![book]])
            .into_connection();
        let repo = SeaOrmProductRepository::new(db);

        let rows = repo.list(&ProductFilter::default()).await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description, None);
        assert_eq!(rows[0].price, Decimal::new(1999, 2));

        let body = serde_json::to_value(&rows)?;
        assert_eq!(body[0]["description"], "");
        assert_eq!(body[0]["price"], 19.99);
        Ok(())
    }

    #[tokio::test]
    async fn list_without_filter_has_no_predicates() -> Result<(), anyhow::Error> {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_results([Vec::<Product>::new()])
            .into_connection();
        let repo = SeaOrmProductRepository::new(db);

        assert!(repo.list(&ProductFilter::new(Some(""), None)).await?.is_empty());
        let log = format!("{:?}", repo.db.into_transaction_log());
        assert!(!log.contains("WHERE"), "unexpected log: {log}");
        Ok(())
    }

    #[tokio::test]
    async fn list_failure_is_a_db_error() {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_errors([DbErr::Custom("connection reset".into())])
            .into_connection();
        let repo = SeaOrmProductRepository::new(db);

        let err = repo.list(&ProductFilter::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Db(_)));
    }

    #[tokio::test]
    async fn get_distinguishes_missing_from_failure() -> Result<(), anyhow::Error> {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_results([vec![laptop()], Vec::new()])
            .append_query_errors([DbErr::Custom("gone away".into())])
            .into_connection();
        let repo = SeaOrmProductRepository::new(db);

        assert_eq!(repo.get(1).await?, Some(laptop()));
        assert_eq!(repo.get(99999).await?, None);
        assert!(matches!(repo.get(2).await, Err(ServiceError::Db(_))));
        Ok(())
    }

    #[tokio::test]
    async fn create_returns_database_id_and_defaulted_description() -> Result<(), anyhow::Error> {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_exec_results([MockExecResult { last_insert_id: 42, rows_affected: 1 }])
            .into_connection();
        let repo = SeaOrmProductRepository::new(db);

        let created = repo.create(NewProduct::new("Tablet", Decimal::new(29999, 2), "Electronics", 10)).await?;
        assert_eq!(created.id, 42);
        assert_eq!(created.name, "Tablet");
        assert_eq!(created.description.as_deref(), Some(""));

        let log = format!("{:?}", repo.db.into_transaction_log());
        assert!(log.contains("INSERT INTO `products`"), "unexpected log: {log}");
        assert!(log.contains("`description`"), "unexpected log: {log}");
        assert!(!log.contains("`id`"), "id must be left to the database: {log}");
        Ok(())
    }

    #[tokio::test]
    async fn create_omits_absent_columns() -> Result<(), anyhow::Error> {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_exec_results([MockExecResult { last_insert_id: 7, rows_affected: 1 }])
            .into_connection();
        let repo = SeaOrmProductRepository::new(db);

        let input = NewProduct { price: Some(Decimal::from(3)), ..NewProduct::default() };
        repo.create(input).await?;

        let log = format!("{:?}", repo.db.into_transaction_log());
        assert!(log.contains("(`price`, `description`)"), "unexpected log: {log}");
        Ok(())
    }

    #[tokio::test]
    async fn create_failure_is_a_db_error() {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_exec_errors([DbErr::Custom("Field 'name' doesn't have a default value".into())])
            .into_connection();
        let repo = SeaOrmProductRepository::new(db);

        let err = repo.create(NewProduct::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Db(_)));
    }
}
