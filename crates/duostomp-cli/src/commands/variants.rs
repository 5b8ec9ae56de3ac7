//! Slot, variant and control listing.

use clap::Args;
use duostomp_pedal::controls::CONTROLS;
use duostomp_pedal::{KnobTarget, Slot1Variant, Slot2Variant, Variant};

/// List the slots, their variants and the control layout.
#[derive(Args)]
pub struct VariantsArgs {
    /// Only list one slot (1 or 2)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub slot: Option<u8>,

    /// Also list every physical control
    #[arg(long)]
    pub controls: bool,
}

/// Run the variants command.
pub fn run(args: VariantsArgs) -> anyhow::Result<()> {
    if args.slot.is_none_or(|s| s == 1) {
        print_slot::<Slot1Variant>(
            1,
            "forward button cycles, backward button toggles knob target",
        );
        println!(
            "  knob target '{}' drives low-pass/high-pass: label \"LPF HPF\"",
            KnobTarget::Filters.name()
        );
        println!();
    }
    if args.slot.is_none_or(|s| s == 2) {
        print_slot::<Slot2Variant>(2, "forward and backward buttons cycle both ways");
        println!();
    }

    if args.controls {
        println!("Controls");
        println!("{}", "-".repeat(32));
        for spec in &CONTROLS {
            println!("  {:<10} {:?}", spec.name, spec.kind);
        }
    }
    Ok(())
}

fn print_slot<V: Variant>(slot: u8, buttons: &str) {
    println!("Slot {slot} ({buttons})");
    println!("{}", "-".repeat(32));
    println!("  {:<12} {:<6} {}", "variant", "label", "knobs A/B");
    for &variant in V::ALL {
        println!(
            "  {:<12} {:<6} \"{}\"",
            variant.name(),
            variant.label(),
            variant.knob_label()
        );
    }
}
