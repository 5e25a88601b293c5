use linfit::{Dataset, Feature, LinearRegression, Output};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // y = 4x + 3, no noise
    let x: Vec<f64> = (0..5).map(f64::from).collect();
    let y: Vec<f64> = x.iter().map(|x| 4.0 * x + 3.0).collect();

    let dataset = Dataset::new(vec![Feature::new("x", x)], Output::new("y", y))?;
    println!("Dataset: {} samples, {} features", dataset.n_samples(), dataset.n_features());

    let model = LinearRegression::train_dataset(&dataset, true)?;
    println!("Fitted: {}", model);
    println!("R² score: {:.4}", model.score(&dataset.features, &dataset.output)?);

    let path = std::env::temp_dir().join("linfit_saved_model.bin");
    model.save(&path)?;

    let input = [5.0];
    println!("Before: {:.6}", model.predict(&input)?);

    let reloaded = LinearRegression::load(&path)?;
    println!("After: {:.6}", reloaded.predict(&input)?);

    std::fs::remove_file(&path)?;
    Ok(())
}
