#![allow(unused_imports)]

pub use dbcompare::mssql::{introspect_table, MssqlConnection};
pub use dbcompare::prelude::*;
pub use testcontainers::runners::AsyncRunner;
pub use testcontainers::ContainerAsync;
pub use testcontainers_modules::mssql_server::MssqlServer;

const SA_PASSWORD: &str = "Dbcompare_Pass1!";

pub async fn setup_mssql() -> (ContainerAsync<MssqlServer>, String) {
    let container = MssqlServer::default()
        .with_accept_eula()
        .with_sa_password(SA_PASSWORD)
        .start()
        .await
        .unwrap();
    let port = container.get_host_port_ipv4(1433).await.unwrap();
    let connection_string = format!(
        "server=tcp:localhost,{port};user=sa;password={SA_PASSWORD};TrustServerCertificate=true"
    );
    (container, connection_string)
}

/// Runs each statement as its own batch.
pub async fn execute(connection_string: &str, statements: &[&str]) {
    let mut connection = MssqlConnection::connect(connection_string).await.unwrap();
    for statement in statements {
        connection
            .client()
            .simple_query(*statement)
            .await
            .unwrap()
            .into_results()
            .await
            .unwrap();
    }
    connection.close().await.unwrap();
}
