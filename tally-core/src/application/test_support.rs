// Shared fixture: a small customers/payments database in memory.
//
// payments at a glance (amounts over 50000 marked *):
//   103  6066, 14571, 1676
//   112  32641, 33347
//   114  45864, 82261*, 7565, 44894
//   124  101244*, 85410*, 11044        avg 65899.3
//   141  60000*, 60000*                avg 60000, large total 120000
//   151  52000*, 53000*, 1000          avg 35333.3, large total 105000

use rusqlite::Connection;

use crate::infrastructure::adapters::sqlite::SqliteConnector;

pub const SCHEMA_AND_DATA: &str = "
CREATE TABLE customers (
    customerNumber INTEGER PRIMARY KEY,
    customerName TEXT,
    country TEXT
);
INSERT INTO customers VALUES
    (103, 'Atelier graphique', 'France'),
    (112, 'Signal Gift Stores', 'USA'),
    (114, 'Australian Collectors, Co.', 'Australia'),
    (119, 'La Rochelle Gifts', 'France'),
    (121, 'Baane Mini Imports', 'Norway'),
    (124, 'Mini Gifts Distributors Ltd.', 'USA'),
    (125, 'Havel & Zbyszek Co', 'Poland'),
    (128, 'Blauer See Auto, Co.', 'Germany'),
    (129, 'Mini Wheels Co.', 'USA'),
    (131, 'Land of Toys Inc.', 'USA'),
    (141, 'Euro+ Shopping Channel', 'Spain'),
    (151, 'Muscle Machine Inc', 'USA');

CREATE TABLE payments (
    customerNumber INTEGER,
    checkNumber TEXT,
    paymentDate TEXT,
    amount REAL
);
INSERT INTO payments VALUES
    (103, 'HQ336336', '2004-10-19', 6066),
    (103, 'JM555205', '2003-06-05', 14571),
    (103, 'OM314933', '2004-12-18', 1676),
    (112, 'BO864823', '2004-12-17', 32641),
    (112, 'HQ55022', '2003-06-06', 33347),
    (114, 'GG31455', '2003-05-20', 45864),
    (114, 'MA765515', '2004-12-15', 82261),
    (114, 'NP603840', '2003-05-31', 7565),
    (114, 'NR27552', '2004-03-10', 44894),
    (124, 'AE215433', '2005-03-05', 101244),
    (124, 'BG255406', '2004-08-28', 85410),
    (124, 'CQ287967', '2003-04-11', 11044),
    (141, 'AU364101', '2003-07-19', 60000),
    (141, 'DB583216', '2004-11-01', 60000),
    (151, 'BF686658', '2003-12-22', 52000),
    (151, 'GB361972', '2003-12-07', 53000),
    (151, 'IP568906', '2004-06-21', 1000);
";

pub fn payments_fixture() -> anyhow::Result<SqliteConnector> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch(SCHEMA_AND_DATA)?;
    Ok(SqliteConnector::from_connection(conn))
}
