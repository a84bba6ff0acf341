use acg_frames::HorizontalCoords;
use acg_lines::{
    AngularLineProjector, Equatorial, LocalSpaceProjector, ObserverLocation, ReferencePoint,
    curve_band, find_in_bands, meridian_band, with_breaks,
};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn gazetteer() -> Vec<ReferencePoint> {
    (0..64)
        .filter_map(|i| {
            let lat = -60.0 + 2.0 * i as f64;
            let lon = -180.0 + 5.625 * i as f64;
            ReferencePoint::new(format!("p{i}"), lat, lon).ok()
        })
        .collect()
}

fn angular_bench(c: &mut Criterion) {
    let projector = AngularLineProjector::default();
    let eq = Equatorial { ra_deg: 123.4, dec_deg: -17.8 };

    let mut group = c.benchmark_group("angular");
    group.bench_function("project_default_grid", |b| {
        b.iter(|| projector.project(black_box(eq), black_box(301.2)))
    });
    group.finish();
}

fn local_space_bench(c: &mut Criterion) {
    let projector = LocalSpaceProjector::default();
    let Ok(observer) = ObserverLocation::new(35.6895, 139.6917) else {
        return;
    };
    let hz = HorizontalCoords {
        azimuth_deg: 247.0,
        altitude_deg: 12.0,
    };

    let mut group = c.benchmark_group("local_space");
    group.bench_function("project_100_points", |b| {
        b.iter(|| projector.project(black_box(observer), black_box(hz)))
    });
    group.finish();
}

fn antimeridian_bench(c: &mut Criterion) {
    let Ok(lines) = AngularLineProjector::default().project(
        Equatorial { ra_deg: 200.0, dec_deg: 22.0 },
        10.0,
    ) else {
        return;
    };

    let mut group = c.benchmark_group("antimeridian");
    group.bench_function("with_breaks_ac", |b| {
        b.iter(|| with_breaks(black_box(&lines.ac.samples)))
    });
    group.bench_function("curve_band_ac", |b| {
        b.iter(|| curve_band(black_box(&lines.ac), 5.0))
    });
    group.bench_function("meridian_band_wrapping", |b| {
        b.iter(|| meridian_band(black_box(178.0), 5.0, -85.0, 85.0))
    });
    group.finish();
}

fn proximity_bench(c: &mut Criterion) {
    let projector = AngularLineProjector::default();
    let lines: Vec<_> = (0..10)
        .filter_map(|i| {
            let eq = Equatorial {
                ra_deg: 36.0 * i as f64,
                dec_deg: -25.0 + 5.0 * i as f64,
            };
            projector.project(eq, 77.0).ok()
        })
        .collect();
    let places = gazetteer();

    let mut group = c.benchmark_group("proximity");
    group.bench_function("ten_bodies_64_points", |b| {
        b.iter(|| {
            find_in_bands(
                lines.iter().enumerate(),
                black_box(&places),
                black_box(5.0),
            )
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    angular_bench,
    local_space_bench,
    antimeridian_bench,
    proximity_bench
);
criterion_main!(benches);
