use geo_locality::{FixedPointCoordinate, LogContext, LogLevel, hilbert_code};

const CITIES: &[(&str, f64, f64)] = &[
    ("Sydney", -33.868820, 151.209296),
    ("Berlin", 52.520008, 13.404954),
    ("Auckland", -36.848461, 174.763336),
    ("Potsdam", 52.390569, 13.064473),
    ("Hamburg", 53.551086, 9.993682),
    ("Melbourne", -37.813629, 144.963058),
    ("Leipzig", 51.339695, 12.373075),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut log = LogContext::new();
    log.unmute();

    let mut points = CITIES
        .iter()
        .map(|&(name, lat, lon)| -> geo_locality::Result<_> {
            let coordinate = FixedPointCoordinate::from_degrees(lat, lon)?;
            Ok((hilbert_code(&coordinate)?, name, coordinate))
        })
        .collect::<geo_locality::Result<Vec<_>>>()?;

    points.sort_unstable_by_key(|&(key, _, _)| key);

    log.in_scope(|| log.write(LogLevel::Info, &format!("sorted {} points", points.len())));

    println!("=== Hilbert Order ===");
    for (i, (key, name, coordinate)) in points.iter().enumerate() {
        println!("{}. {} ({})", i + 1, name, coordinate.to_lat_lon_string());
        println!("   Key: {:#018x}", key);

        if let Some((_, next_name, next)) = points.get(i + 1) {
            let meters = FixedPointCoordinate::approximate_distance(coordinate, next)?;
            println!("   To {}: {:.1} km", next_name, meters / 1000.0);
        }
    }

    Ok(())
}
