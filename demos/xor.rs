use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ranger_nn::{
    evaluate, train_loop, Network, NetworkSpec, NeuralFunctionPlot, TrainConfig, Vector, XorDataset,
};

fn main() -> ranger_nn::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let spec = NetworkSpec::new(vec![2, 16, 1], 3.0);
    let mut network = Network::initialize(&spec, &mut rng)?;
    println!("Initialized network with {} connections", network.connection_count());

    let (train, validation) = XorDataset::default_dataset(2_000, &mut rng).split(0.2);
    let config = TrainConfig::new(10, 0.01);
    let loss = train_loop(&mut network, &train, Some(&validation), &config, &mut rng)?;
    println!("Final train loss = {loss:.6}, validation loss = {:.6}", evaluate(&mut network, &validation)?);

    for input in [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]] {
        let x = Vector::new(input.to_vec());
        println!(
            "Input: {} -> Output: {:.4} (target {:.4})",
            x,
            network.forward(&x)?.to_scalar()?,
            XorDataset::optimal_value(&x)?
        );
    }

    let plot = NeuralFunctionPlot::plot(&mut network, XorDataset::window(), 15)?;
    if let Some((lo, hi)) = plot.range() {
        println!("Learned function over {:?} spans [{lo:.4}, {hi:.4}]", plot.window);
    }
    Ok(())
}
