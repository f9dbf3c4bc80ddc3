//! Built-in automotive repair corpus and seeding routine.
//!
//! Seeding is an offline process: it embeds each entry and inserts it into
//! the configured store. Query-time code never mutates the corpus.

use super::{KnowledgeDocument, KnowledgeStore};
use crate::embedding::Embedder;
use crate::error::Result;
use std::sync::Arc;
use tracing::info;

/// A corpus entry before embedding.
pub struct SeedEntry {
    pub title: &'static str,
    pub category: &'static str,
    pub content: &'static str,
}

/// The built-in repair knowledge corpus.
pub const REPAIR_KNOWLEDGE: &[SeedEntry] = &[
    SeedEntry {
        title: "CV Joint Failure - Diagnosis and Repair",
        category: "drivetrain",
        content: "CV (Constant Velocity) joints are critical components in front-wheel drive \
vehicles. Common symptoms include clicking or popping noise when turning (especially at sharp \
angles), vibration during acceleration, grease on the inside of wheel rims, and a torn CV boot \
leaking grease. Diagnosis: test drive in a figure-8 pattern and listen for clicking; inspect CV \
boots for tears. Repair cost: $300-$800 per axle including labor. Prevention: replace torn boots \
immediately before joint damage occurs.",
    },
    SeedEntry {
        title: "Brake Pad Wear - Symptoms and Replacement",
        category: "brakes",
        content: "Brake pads wear naturally and require periodic replacement. Symptoms include \
squealing or grinding noise when braking, reduced braking performance, brake warning light, \
vibration or pulsation when braking, and pulling to one side. Diagnosis: measure pad thickness \
(should be above 3mm); squealer tabs create noise at 2-3mm. Replacement cost: $150-$300 per axle \
including labor. Replace pads on both sides of an axle simultaneously and inspect rotors for \
wear or warping.",
    },
    SeedEntry {
        title: "Alternator Failure - Diagnosis and Replacement",
        category: "electrical",
        content: "The alternator charges the battery and powers electrical systems while the \
engine runs. Failure symptoms: battery warning light, dim or flickering headlights, dead battery \
after driving, whining or grinding noise from the alternator, burning smell. Diagnosis: battery \
voltage should read 12.4-12.7V off and 13.8-14.4V running; load test alternator output and check \
the drive belt. Replacement cost: $400-$800 including labor. Test battery condition first, since \
a weak battery causes similar symptoms.",
    },
    SeedEntry {
        title: "Engine Misfire - P0300 Code Diagnosis",
        category: "engine",
        content: "Engine misfires occur when combustion fails in one or more cylinders. Symptoms: \
check engine light (P0300-P0308 codes), rough idle or shaking, loss of power during acceleration, \
increased fuel consumption, smell of unburned fuel. Common causes in order of likelihood: worn \
spark plugs, faulty ignition coils, fuel injector problems, low compression, vacuum leaks. \
Diagnosis: read codes to identify the cylinder, inspect spark plugs, test ignition coils, check \
compression. Spark plugs cost $100-$300; ignition coils $150-$400 per coil.",
    },
    SeedEntry {
        title: "Transmission Slipping - Diagnosis and Solutions",
        category: "transmission",
        content: "Transmission slipping occurs when gears fail to engage properly or RPMs rise \
without a corresponding speed increase. Symptoms: delayed engagement when shifting into drive or \
reverse, rough or jerky shifting, burning smell, fluid leaks. Diagnosis: check fluid level and \
condition (should be red or pink, not brown or burnt) and scan for transmission codes. Common \
causes: low or contaminated fluid, worn clutch plates, torque converter failure, solenoid \
problems. Fluid change $150-$250; rebuild $1,500-$3,500. Change fluid per the manufacturer \
schedule, typically every 30k-60k miles.",
    },
    SeedEntry {
        title: "Coolant System Issues - Overheating Prevention",
        category: "cooling",
        content: "The cooling system prevents engine overheating. Symptoms of failure: temperature \
gauge reading high, steam from the engine bay, sweet smell from a coolant leak, heater not \
working, coolant puddles under the vehicle. Common causes: low coolant, thermostat stuck closed, \
radiator blockage, water pump failure, blown head gasket, cooling fan not working. Diagnosis: \
check coolant level when cold, pressure test for leaks, test thermostat and fan operation. \
Thermostat $150-$300; water pump $300-$750; radiator $400-$900. Flush coolant every 30k-50k miles.",
    },
    SeedEntry {
        title: "Battery Testing and Replacement",
        category: "electrical",
        content: "Car batteries typically last 3-5 years. Signs of failure: slow engine cranking, \
clicking sound when turning the key, dim headlights at idle, battery warning light, swollen case, \
corroded terminals. Testing: 12.6V fully charged, 12.4V at 75%, 12.2V at 50%; a load test shows \
capacity under strain. Common causes: age, extreme temperatures, short trips that never fully \
recharge, charging system problems. Replacement cost: $100-$250 installed. Clean terminals \
regularly and test annually after year three.",
    },
    SeedEntry {
        title: "Timing Belt Replacement - Critical Preventive Maintenance",
        category: "engine",
        content: "Timing belts synchronize valve and piston movement; failure can destroy an \
interference engine. Replacement interval is typically 60k-100k miles or 5-7 years. Warning signs \
(often none until failure): ticking noise from the engine, misfires, oil leaking from the front \
of the engine, engine won't start. A broken belt in an interference engine causes $2,000-$5,000+ \
in damage. Replacement cost: $500-$1,200 including labor. Replace the water pump, tensioners, \
and idler pulleys at the same time since the labor is already done.",
    },
    SeedEntry {
        title: "Wheel Bearing Noise - Diagnosis and Replacement",
        category: "wheels",
        content: "Wheel bearings let wheels rotate smoothly. Failure symptoms: humming, growling, \
or grinding noise that changes with speed, noise louder when turning, wheel wobble or play, ABS \
warning light, uneven tire wear. Testing: lift the vehicle, grasp the tire at 12 and 6 o'clock, \
and push-pull to check for play; spin the wheel and feel for roughness. Replacement cost: \
$200-$500 per wheel including labor. A completely failed bearing can lock a wheel, so replace \
promptly once diagnosed.",
    },
    SeedEntry {
        title: "Serpentine Belt and Tensioner Wear",
        category: "engine",
        content: "The serpentine belt drives the alternator, power steering pump, water pump, and \
AC compressor. Failure symptoms: squealing noise at startup or when turning, whining that rises \
with engine speed, visible cracks or glazing on the belt, battery or overheating warnings when \
the belt finally fails. Diagnosis: inspect the belt for cracks across multiple ribs and check \
tensioner spring tension and pulley bearings for play. Replacement cost: belt $100-$200, \
tensioner $150-$350. Replace the belt every 60k-100k miles.",
    },
    SeedEntry {
        title: "Fuel Pump Failure - Diagnosis and Replacement",
        category: "fuel",
        content: "The fuel pump delivers fuel from tank to engine. Failure symptoms: engine cranks \
but won't start, engine starts then dies, sputtering at high speed, loss of power under load, \
whining noise from the fuel tank. Common causes: contaminated fuel, habitually running the tank \
low (the pump uses fuel for cooling), age, clogged fuel filter. Diagnosis: check fuel pressure \
against spec and listen for the pump priming at key-on. Replacement cost: $400-$900 including \
labor. Keep the tank above a quarter full.",
    },
];

/// Embed and insert the built-in corpus into a store.
///
/// Returns the number of documents inserted.
pub async fn seed_knowledge(
    store: Arc<dyn KnowledgeStore>,
    embedder: Arc<dyn Embedder>,
) -> Result<usize> {
    let texts: Vec<String> = REPAIR_KNOWLEDGE
        .iter()
        .map(|e| format!("{}\n{}", e.title, e.content))
        .collect();

    info!("Embedding {} knowledge documents", texts.len());
    let embeddings = embedder.embed_batch(&texts).await?;

    let mut inserted = 0;
    for (entry, embedding) in REPAIR_KNOWLEDGE.iter().zip(embeddings) {
        let doc = KnowledgeDocument::new(
            entry.title.to_string(),
            entry.category.to_string(),
            entry.content.to_string(),
            embedding,
        );
        store.insert(&doc).await?;
        inserted += 1;
    }

    info!("Seeded {} knowledge documents", inserted);
    Ok(inserted)
}
