//! Example that demonstrates the usage shown in the package documentation.
//!
//! This shows how to use the `cpumask` package to convert between core lists and cpumasks.

fn main() {
    println!("=== cpumask README Example ===");

    let cores = cpumask::parse_list("0,2,4-7").unwrap();
    assert_eq!(cpumask::emit_hex(&cores), "0xf5");

    println!("Selected cores: {:?}", cores.iter().collect::<Vec<_>>());
    println!("As cpumask: {cores:#x}");

    let cores = cpumask::parse_hex("0x36").unwrap();
    assert_eq!(cpumask::emit_list(&cores), "1,2,4,5");

    println!("As core list: {cores}");
    println!("Core count: {}", cores.count());

    println!("README example completed successfully!");
}
