use mlbattle_engine::{
    AlgorithmType, Matchup, MoveId, effectiveness_text, messages, type_matchups,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct MatchupsArg {
    /// Algorithm type to show (all types when omitted)
    ty: Option<AlgorithmType>,
}

pub(crate) fn run(arg: &MatchupsArg) {
    let types = match arg.ty {
        Some(ty) => vec![ty],
        None => AlgorithmType::ALL.to_vec(),
    };
    for ty in types {
        print_type(ty);
    }
}

fn print_matchups(label: &str, matchups: &[Matchup]) {
    if matchups.is_empty() {
        return;
    }
    println!("  {label}:");
    for m in matchups {
        println!("{}", matchup_line(m));
    }
}

fn matchup_line(m: &Matchup) -> String {
    let line = format!("    {:<14} x{:.1}  {}", m.other.as_str(), m.multiplier, m.reason);
    match effectiveness_text(m.multiplier) {
        "" => line,
        text => format!("{line} ({text})"),
    }
}

fn print_type(ty: AlgorithmType) {
    let matchups = type_matchups(ty);
    println!("{ty}");
    print_matchups("strong against", &matchups.strong_against);
    print_matchups("weak against", &matchups.weak_against);
    print_matchups("vulnerable to", &matchups.vulnerable_to);
    print_matchups("resistant to", &matchups.resistant_to);

    println!("  moves:");
    for id in MoveId::ALL.into_iter().filter(|id| id.data().ty == ty) {
        let data = id.data();
        println!(
            "    {:<24} {:<8} power {:>3}  acc {:>3}%  pp {:>2}",
            data.name,
            data.category.to_string(),
            data.power,
            data.accuracy,
            data.pp
        );
        let explanation = messages::move_explanation(id);
        println!("      {}", explanation.message);
        if let Some(educational) = explanation.educational {
            println!("      {educational}");
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matchup(multiplier: f64) -> Matchup {
        Matchup {
            other: AlgorithmType::Geometric,
            multiplier,
            reason: "test",
        }
    }

    #[test]
    fn test_matchup_line_carries_effectiveness() {
        assert!(matchup_line(&matchup(1.5)).ends_with("(It's super effective!)"));
        assert!(matchup_line(&matchup(0.5)).ends_with("(It's barely effective...)"));
        assert!(matchup_line(&matchup(1.0)).ends_with("test"));
    }
}
