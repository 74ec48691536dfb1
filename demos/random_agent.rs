use invsim::execution::{Policy, RandomPolicy};
use invsim::{InventoryEnv, SimConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp(None)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => SimConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => SimConfig::reference(),
    };

    let mut env = InventoryEnv::new(config)?;
    let mut policy = RandomPolicy::new(
        env.config().seed,
        env.material_count(),
        env.config().max_order_quantity,
    );

    let mut observation = env.reset()?;
    println!("Initial Observation: {:?}", observation);

    let mut total_reward = 0.0;
    loop {
        let decision = policy.act(&observation);
        let outcome = env.step(&decision)?;
        total_reward += outcome.reward;
        observation = outcome.observation;

        let now = env.simulation().map_or(0, |s| s.now());
        println!(
            "Time: {}, Decision: {:?}, Observation: {:?}, Reward: {:.2}, Done: {}",
            now, decision.orders, observation, outcome.reward, outcome.terminated
        );
        for event in &outcome.trace {
            println!("    {}", event);
        }

        if outcome.terminated {
            break;
        }
    }

    println!("Final Observation: {:?}, Total Reward: {:.2}", observation, total_reward);
    Ok(())
}
