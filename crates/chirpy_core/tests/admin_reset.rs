use chirpy_core::db::open_db_in_memory;
use chirpy_core::{
    AdminService, Chirp, ChirpRepository, Platform, ServiceError, SqliteChirpRepository,
    SqliteUserRepository, User, UserRepository,
};
use rusqlite::Connection;

fn seed(conn: &Connection) -> (User, Chirp) {
    let users = SqliteUserRepository::try_new(conn).unwrap();
    let chirps = SqliteChirpRepository::try_new(conn).unwrap();

    let user = User::new("a@example.com");
    users.create_user(&user).unwrap();
    users.create_user(&User::new("b@example.com")).unwrap();
    let chirp = Chirp::new(user.id, "hi");
    chirps.create_chirp(&chirp).unwrap();
    (user, chirp)
}

fn row_count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}

#[test]
fn reset_on_dev_deletes_users_and_cascades_to_chirps() {
    let conn = open_db_in_memory().unwrap();
    let (user, chirp) = seed(&conn);

    let service = AdminService::new(SqliteUserRepository::try_new(&conn).unwrap(), Platform::Dev);
    assert_eq!(service.reset().unwrap(), 2);

    assert_eq!(row_count(&conn, "users"), 0);
    assert_eq!(row_count(&conn, "chirps"), 0);

    let users = SqliteUserRepository::try_new(&conn).unwrap();
    let chirps = SqliteChirpRepository::try_new(&conn).unwrap();
    assert!(users.get_user(user.id).unwrap().is_none());
    assert!(chirps.get_chirp(chirp.chirp_id).unwrap().is_none());
}

#[test]
fn reset_on_prod_is_forbidden_and_keeps_rows() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);

    let service =
        AdminService::new(SqliteUserRepository::try_new(&conn).unwrap(), Platform::Prod);
    let err = service.reset().unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Forbidden {
            operation: "reset",
            platform: Platform::Prod,
        }
    ));

    assert_eq!(row_count(&conn, "users"), 2);
    assert_eq!(row_count(&conn, "chirps"), 1);
}

#[test]
fn reset_on_empty_database_reports_zero() {
    let conn = open_db_in_memory().unwrap();
    let service = AdminService::new(SqliteUserRepository::try_new(&conn).unwrap(), Platform::Dev);
    assert_eq!(service.reset().unwrap(), 0);
}
