use digipin_rs::{DigipinCell, DigipinError, decode};

fn main() -> Result<(), DigipinError> {
    env_logger::init();

    let lat = 28.622788;
    let lon = 77.213033;

    let cell = DigipinCell::from_lat_lon(lat, lon)?;
    log::info!("encoded ({}, {})", lat, lon);

    println!("DIGIPIN: {}", cell.code);
    println!("Center: ({}, {})", cell.latitude(), cell.longitude());
    println!("Parent (level 6): {}", cell.parent(6)?);

    let decoded = decode(&cell.code)?;
    println!("Decoded: {}, {}", decoded.latitude, decoded.longitude);

    let polygon = cell.to_polygon();
    println!("Polygon: {:?}", polygon);

    Ok(())
}
