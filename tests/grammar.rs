use symbios_tree::{Grammar, Preset, RuleSet, expand};

#[test]
fn zero_iterations_is_identity() {
    let rules = Preset::Curved.rules();
    for axiom in ["", "G", "F[+l]a", "xyz"] {
        assert_eq!(expand(axiom, 0, &rules), axiom);
    }
}

#[test]
fn length_grows_geometrically_with_fixed_width_rules() {
    // Every symbol maps to a replacement of length 3.
    let rules = RuleSet::new()
        .with_rule('A', "ABA")
        .with_rule('B', "BBB");
    let axiom = "AB";
    for n in 0..6 {
        assert_eq!(expand(axiom, n, &rules).len(), axiom.len() * 3usize.pow(n as u32));
    }
}

#[test]
fn unknown_symbols_survive_every_iteration() {
    let rules = RuleSet::new().with_rule('A', "A+A");
    let expanded = expand("xAy", 3, &rules);
    assert!(expanded.starts_with('x'));
    assert!(expanded.ends_with('y'));
    assert_eq!(expanded.matches('+').count(), 7);
}

#[test]
fn single_iteration_of_binary_branching() {
    let grammar = Grammar::new("A", RuleSet::new().with_rule('A', "F[+A][-A]"));
    assert_eq!(grammar.expand(1), "F[+A][-A]");
    assert_eq!(
        grammar.expand(2),
        "F[+F[+A][-A]][-F[+A][-A]]"
    );
}

#[test]
fn rewriting_is_simultaneous() {
    // A -> B and B -> A must swap, not collapse.
    let rules: RuleSet = "A -> B\nB -> A".parse().unwrap();
    assert_eq!(expand("AAB", 1, &rules), "BBA");
    assert_eq!(expand("AAB", 2, &rules), "AAB");
}

#[test]
fn preset_expansion_is_deterministic_and_balanced() {
    for preset in Preset::ALL {
        let grammar = preset.grammar();
        let first = grammar.expand(3);
        assert_eq!(first, grammar.expand(3), "{preset} expanded differently");

        let mut depth = 0i64;
        for c in first.chars() {
            match c {
                '[' => depth += 1,
                ']' => {
                    depth -= 1;
                    assert!(depth >= 0, "{preset} closes a bracket it never opened");
                }
                _ => {}
            }
        }
        assert_eq!(depth, 0, "{preset} leaves brackets open");
    }
}
