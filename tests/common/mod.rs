use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use knn_select_rs::Dataset;

pub const LABEL: &str = "diagnosis";

/// Roughly normal noise: sum of three uniforms, scaled to `sd`.
fn noise(rng: &mut StdRng, sd: f64) -> f64 {
    let sum: f64 = (0..3).map(|_| rng.gen_range(-1.0..1.0)).sum();
    sum * sd
}

/// Two overlapping clusters shaped like the radius/texture means of the
/// breast cancer data: 357 Benign and 212 Malignant records.
pub fn cancer_like(seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rows: Vec<(Vec<f64>, &str)> = Vec::with_capacity(569);

    for _ in 0..357 {
        rows.push((
            vec![12.1 + noise(&mut rng, 1.8), 17.9 + noise(&mut rng, 4.0)],
            "Benign",
        ));
    }
    for _ in 0..212 {
        rows.push((
            vec![17.5 + noise(&mut rng, 3.2), 21.6 + noise(&mut rng, 3.8)],
            "Malignant",
        ));
    }
    rows.shuffle(&mut rng);

    let (features, labels): (Vec<_>, Vec<_>) = rows
        .into_iter()
        .map(|(x, y)| (x, y.to_string()))
        .unzip();

    Dataset::new(
        vec!["radius_mean".to_string(), "texture_mean".to_string()],
        features,
    )
    .unwrap()
    .with_labels(LABEL, labels)
    .unwrap()
}
