use arts::classes::{ArrayOfGriddedField2, GriddedField2, Matrix, Vector, XsecRecord};
use arts::native::Species;
use arts::{ArtsClass, ClassError, FileFormat, NativeError, SaveOptions};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn band(name: &str, scale: f64) -> GriddedField2 {
    let gf = GriddedField2::new().unwrap();
    gf.set_name(name).unwrap();
    gf.set_grid_name(0, "Frequency").unwrap();
    gf.set_grid_name(1, "Coeffs").unwrap();
    gf.set_grid(0, &Vector::from_slice(&[1.0e12, 2.0e12, 3.0e12]).unwrap())
        .unwrap();
    gf.set_grid(1, &Vector::from_slice(&[0.0, 1.0]).unwrap()).unwrap();
    let values = (0..6).map(|i| f64::from(i) * scale).collect();
    gf.set_data(&Matrix::from_rows(3, 2, values).unwrap()).unwrap();
    gf
}

fn sample_record() -> XsecRecord {
    let x = XsecRecord::new().unwrap();
    x.set_version(3).unwrap();
    x.set_species(Species::CFC11).unwrap();
    x.fit_min_pressures()
        .unwrap()
        .set_values(&[100.0, 150.0])
        .unwrap();
    x.fit_max_pressures()
        .unwrap()
        .set_values(&[1.0e5, 1.1e5])
        .unwrap();
    x.fit_min_temperatures()
        .unwrap()
        .set_values(&[190.0, 195.0])
        .unwrap();
    x.fit_max_temperatures()
        .unwrap()
        .set_values(&[300.0, 305.5])
        .unwrap();
    let coeffs = ArrayOfGriddedField2::new().unwrap();
    coeffs.push(&band("band0", 0.5)).unwrap();
    coeffs.push(&band("band1", -1.25e-3)).unwrap();
    x.set_fit_coeffs(&coeffs).unwrap();
    x
}

#[test]
fn save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("t.xml");

    let x = XsecRecord::new().unwrap();
    x.set_version(3).unwrap();
    let written = x.savexml(&path, SaveOptions::default()).unwrap();
    assert_eq!(written, path);

    let y = XsecRecord::new().unwrap();
    y.readxml(&path).unwrap();
    assert_eq!(y.version().unwrap(), 3);
    assert_eq!(x, y);
}

#[rstest]
#[case(FileFormat::Ascii)]
#[case(FileFormat::Binary)]
fn full_record_survives_every_format(#[case] format: FileFormat) {
    let dir = tempfile::tempdir().unwrap();
    let x = sample_record();
    let written = x
        .savexml(dir.path().join("record.xml"), SaveOptions::new(format))
        .unwrap();

    let y = XsecRecord::new().unwrap();
    y.readxml(&written).unwrap();
    assert_eq!(y.species().unwrap(), Species::CFC11);
    assert_eq!(y.fit_coeffs().unwrap().len().unwrap(), 2);
    assert_eq!(x, y);
}

#[cfg(feature = "zascii")]
#[test]
fn zipped_record_is_found_without_suffix() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("record.xml");
    let x = sample_record();
    let written = x
        .savexml(&path, SaveOptions::new(FileFormat::ZippedAscii))
        .unwrap();
    assert_eq!(written, dir.path().join("record.xml.gz"));

    let y = XsecRecord::new().unwrap();
    y.readxml(&path).unwrap();
    assert_eq!(x, y);
}

#[test]
fn no_clobber_refuses_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("t.xml");
    let x = sample_record();
    let options = SaveOptions::default().clobber(false);

    x.savexml(&path, options).unwrap();
    x.set_version(7).unwrap();
    let err = x.savexml(&path, options).unwrap_err();
    assert!(matches!(err, ClassError::Io { ref path, .. } if path.ends_with("t.xml")));

    let y = XsecRecord::new().unwrap();
    y.readxml(&path).unwrap();
    assert_eq!(y.version().unwrap(), 3);

    x.savexml(&path, SaveOptions::default()).unwrap();
    y.readxml(&path).unwrap();
    assert_eq!(y.version().unwrap(), 7);
}

#[test]
fn no_clobber_checks_binary_companion() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("t.xml");
    let bin = dir.path().join("t.xml.bin");
    let x = sample_record();
    x.savexml(&path, SaveOptions::new(FileFormat::Binary)).unwrap();
    let written = std::fs::read(&bin).unwrap();
    std::fs::remove_file(&path).unwrap();

    x.set_version(7).unwrap();
    let err = x
        .savexml(&path, SaveOptions::new(FileFormat::Binary).clobber(false))
        .unwrap_err();
    assert!(matches!(err, ClassError::Io { ref path, .. } if path.ends_with("t.xml.bin")));
    assert!(!path.exists());
    assert_eq!(std::fs::read(&bin).unwrap(), written);

    x.savexml(&path, SaveOptions::new(FileFormat::Binary)).unwrap();
    let y = XsecRecord::new().unwrap();
    y.readxml(&path).unwrap();
    assert_eq!(y, x);
}

#[test]
fn missing_and_mismatched_files_fail_as_io() {
    let dir = tempfile::tempdir().unwrap();
    let x = XsecRecord::new().unwrap();
    assert!(matches!(
        x.readxml(dir.path().join("absent.xml")),
        Err(ClassError::Io { .. })
    ));

    let v = Vector::from_slice(&[1.0]).unwrap();
    let path = v
        .savexml(dir.path().join("v.xml"), SaveOptions::default())
        .unwrap();
    assert!(matches!(x.readxml(&path), Err(ClassError::Io { .. })));
    assert_eq!(x, XsecRecord::new().unwrap());
}

#[test]
fn set_makes_an_independent_copy() {
    let x = sample_record();
    let y = XsecRecord::new().unwrap();
    y.set(&x).unwrap();
    assert_eq!(x, y);

    x.fit_max_temperatures().unwrap().set_values(&[0.0]).unwrap();
    x.fit_coeffs().unwrap().resize(0).unwrap();
    assert_eq!(
        y.fit_max_temperatures().unwrap().values().unwrap(),
        vec![300.0, 305.5]
    );
    assert_eq!(y.fit_coeffs().unwrap().len().unwrap(), 2);
    assert!(x != y);
}

#[test]
fn field_views_die_with_their_owner() {
    let (pressures, coeffs) = {
        let x = sample_record();
        (x.fit_min_pressures().unwrap(), x.fit_coeffs().unwrap())
    };
    assert!(matches!(
        pressures.values(),
        Err(ClassError::Native(NativeError::InvalidHandle(_)))
    ));
    assert!(matches!(
        coeffs.len(),
        Err(ClassError::Native(NativeError::InvalidHandle(_)))
    ));
}

#[test]
fn print_and_json() {
    let x = sample_record();
    let text = x.render().unwrap();
    assert!(text.contains("CFC11"));
    assert_eq!(text, x.to_string());
    x.print().unwrap();

    let json: serde_json::Value = serde_json::from_str(&x.to_json().unwrap()).unwrap();
    assert!(json.is_object());
}
