use arts::classes::{ArtsString, GriddedField2, Index, Matrix, Numeric, Vector};
use arts::{ArtsClass, ClassError, FileFormat, SaveOptions};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn scalar_values() {
    let i = Index::with_value(-7).unwrap();
    let n = Numeric::with_value(2.5e-3).unwrap();
    let s = ArtsString::with_value("CFC-11").unwrap();
    assert_eq!(i.value().unwrap(), -7);
    assert_eq!(n.value().unwrap(), 2.5e-3);
    assert_eq!(s.value().unwrap(), "CFC-11");
    assert_eq!(i.class_name(), "Index");
    assert_eq!(s.class_name(), "String");
}

#[rstest]
#[case(FileFormat::Ascii)]
#[case(FileFormat::Binary)]
fn numeric_round_trip(#[case] format: FileFormat) {
    let dir = tempfile::tempdir().unwrap();
    let n = Numeric::with_value(-1.0 / 3.0).unwrap();
    let path = n
        .savexml(dir.path().join("n.xml"), SaveOptions::new(format))
        .unwrap();

    let back = Numeric::new().unwrap();
    back.readxml(&path).unwrap();
    assert_eq!(back.value().unwrap(), -1.0 / 3.0);
}

#[test]
fn binary_save_writes_companion_file() {
    let dir = tempfile::tempdir().unwrap();
    let v = Vector::from_slice(&[1.0, 2.0, 3.0]).unwrap();
    let path = v
        .savexml(dir.path().join("v.xml"), SaveOptions::new(FileFormat::Binary))
        .unwrap();
    let companion = dir.path().join("v.xml.bin");
    assert_eq!(std::fs::metadata(&companion).unwrap().len(), 24);

    let back = Vector::new().unwrap();
    back.readxml(&path).unwrap();
    assert_eq!(back, v);

    std::fs::remove_file(&companion).unwrap();
    assert!(matches!(back.readxml(&path), Err(ClassError::Io { .. })));
}

#[test]
fn oversized_binary_count_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let v = Vector::from_slice(&[1.0, 2.0]).unwrap();
    let path = v
        .savexml(dir.path().join("v.xml"), SaveOptions::new(FileFormat::Binary))
        .unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("nelem=\"2\""));
    std::fs::write(
        &path,
        text.replace("nelem=\"2\"", "nelem=\"2305843009213693952\""),
    )
    .unwrap();

    let back = Vector::from_slice(&[9.0]).unwrap();
    assert!(matches!(back.readxml(&path), Err(ClassError::Io { .. })));
    assert_eq!(back.values().unwrap(), vec![9.0]);
}

#[test]
fn save_options_from_tag() {
    let options = SaveOptions::from_tag("zascii", false).unwrap();
    assert_eq!(options.format, FileFormat::ZippedAscii);
    assert!(!options.clobber);
    assert_eq!("binary".parse::<FileFormat>().unwrap(), FileFormat::Binary);
    assert_eq!(FileFormat::Ascii.to_string(), "ascii");
}

#[test]
fn matrix_round_trip_keeps_shape() {
    let dir = tempfile::tempdir().unwrap();
    let m = Matrix::from_rows(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    let path = m
        .savexml(dir.path().join("m.xml"), SaveOptions::default())
        .unwrap();

    let back = Matrix::new().unwrap();
    back.readxml(&path).unwrap();
    assert_eq!(back.shape().unwrap(), (2, 3));
    assert_eq!(back.data().unwrap().data(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
}

#[test]
fn gridded_field_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let gf = GriddedField2::new().unwrap();
    gf.set_name("coeffs").unwrap();
    gf.set_grid_name(0, "Frequency").unwrap();
    gf.set_grid_name(1, "Coeffs").unwrap();
    gf.set_grid(0, &Vector::from_slice(&[1.0, 2.0]).unwrap()).unwrap();
    gf.set_grid(1, &Vector::from_slice(&[0.0]).unwrap()).unwrap();
    gf.set_data(&Matrix::from_rows(2, 1, vec![0.5, 0.25]).unwrap())
        .unwrap();
    let path = gf
        .savexml(dir.path().join("gf.xml"), SaveOptions::default())
        .unwrap();

    let back = GriddedField2::new().unwrap();
    back.readxml(&path).unwrap();
    assert_eq!(back.grid_name(0).unwrap(), "Frequency");
    assert_eq!(back, gf);
}

#[test]
fn into_raw_hands_over_ownership() {
    let s = ArtsString::with_value("kept").unwrap();
    let raw = s.into_raw();
    let view = ArtsString::from_raw(raw).unwrap();
    assert_eq!(view.value().unwrap(), "kept");
    drop(view);

    let owner = ArtsString::adopt(raw).unwrap();
    assert_eq!(owner.value().unwrap(), "kept");
}
