//! Loading universes from files on disk.

use std::io::Write;

use bondopt_core::{ClassLevel, Date};
use bondopt_ext_file::{load_universe, FileError};
use rust_decimal_macros::dec;
use tempfile::NamedTempFile;

fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_two_dates() {
    let file = write_csv(
        "SECURITY_ALIAS,CLASS_1,CLASS_2,CLASS_3,CLASS_4,RATING,EFFDATE,EFFDUR,MV,OAS,YTM\n\
         XOM-22,Corporate,Energy,Integrated,Senior, AA ,2022-12-30,5.5,900000,1.10,4.6\n\
         XOM-23,Corporate,Energy,Integrated,Senior,AA,2023-03-31,5.4,910000,1.05,4.5\n\
         DUK-23,Corporate,Utility,Electric,Senior,A,03/31/2023,9.8,500000,1.60,5.2\n",
    );

    let universe = load_universe(file.path()).unwrap();

    assert_eq!(universe.len(), 3);
    assert_eq!(
        universe.effective_dates(),
        vec![
            Date::from_ymd(2022, 12, 30).unwrap(),
            Date::from_ymd(2023, 3, 31).unwrap()
        ]
    );
    assert_eq!(universe.distinct_classes(ClassLevel::Two), vec!["Energy", "Utility"]);
    assert_eq!(universe.get("XOM-22").unwrap().rating.as_str(), "AA");
    assert_eq!(universe.get("DUK-23").unwrap().market_value, dec!(500000));
}

#[test]
fn test_header_only_is_empty_universe() {
    let file = write_csv("SECURITY_ALIAS,CLASS_1,CLASS_2,CLASS_3,CLASS_4,RATING,EFFDATE,EFFDUR,MV,OAS,YTM\n");
    let universe = load_universe(file.path()).unwrap();
    assert!(universe.is_empty());
}

#[test]
fn test_negative_market_value_rejected() {
    let file = write_csv(
        "SECURITY_ALIAS,CLASS_1,CLASS_2,CLASS_3,CLASS_4,RATING,EFFDATE,EFFDUR,MV,OAS,YTM\n\
         B1,Corporate,Energy,Integrated,Senior,AA,2023-03-31,5.5,-10,1.10,4.6\n",
    );
    let err = load_universe(file.path()).unwrap_err();
    assert!(matches!(err, FileError::Record { line: 2, .. }));
}
