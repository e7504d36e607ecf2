//! Choosing the attribute a strategy organizes its choices around.

use cogseq_core::{Context, Lexicon, primitives};
use cogseq_types::{Attribute, Probability};

/// Decides the bias attribute for one run.
///
/// Policies may spend primitives (a coin flip, say); those are recorded in
/// the run that asked.
pub trait BiasPolicy {
    fn choose(&self, ctx: &mut Context, lexicon: &Lexicon) -> Attribute;
}

/// Prefer the attribute that splits the lexicon into exactly two classes.
///
/// When neither or both attributes do, a fair coin decides between the
/// attributes the lexicon actually carries. An attribute no token carries is
/// never chosen while the other one is carried.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoValuePolicy;

impl BiasPolicy for TwoValuePolicy {
    fn choose(&self, ctx: &mut Context, lexicon: &Lexicon) -> Attribute {
        let first = lexicon.attribute_values(Attribute::First).len();
        let second = lexicon.attribute_values(Attribute::Second).len();
        match (first, second) {
            (2, s) if s != 2 => Attribute::First,
            (f, 2) if f != 2 => Attribute::Second,
            (0, s) if s > 0 => Attribute::Second,
            (f, 0) if f > 0 => Attribute::First,
            _ => {
                if primitives::flip(ctx, Probability::HALF) {
                    Attribute::First
                } else {
                    Attribute::Second
                }
            }
        }
    }
}

/// Always the same attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedBias(pub Attribute);

impl BiasPolicy for FixedBias {
    fn choose(&self, _ctx: &mut Context, _lexicon: &Lexicon) -> Attribute {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cogseq_core::Complexity;
    use cogseq_types::{CogError, Token};

    fn tokens(specs: &[(&str, Option<&str>, Option<&str>)]) -> Lexicon {
        Lexicon::new(specs.iter().map(|(name, a1, a2)| {
            let mut token = Token::new(*name);
            if let Some(v) = a1 {
                token = token.with_attribute1(*v);
            }
            if let Some(v) = a2 {
                token = token.with_attribute2(*v);
            }
            token
        }))
    }

    #[test]
    fn picks_the_two_valued_attribute() {
        let mut ctx = Context::default();
        let lexicon = tokens(&[
            ("I", Some("red"), Some("circle")),
            ("J", Some("red"), Some("square")),
            ("K", Some("red"), Some("triangle")),
            ("L", Some("blue"), Some("circle")),
        ]);
        assert_eq!(TwoValuePolicy.choose(&mut ctx, &lexicon), Attribute::First);

        let lexicon = tokens(&[
            ("I", Some("red"), Some("circle")),
            ("J", Some("blue"), Some("square")),
            ("K", Some("green"), Some("square")),
        ]);
        assert_eq!(TwoValuePolicy.choose(&mut ctx, &lexicon), Attribute::Second);
    }

    #[test]
    fn never_picks_an_uncarried_attribute() {
        let mut ctx = Context::default();
        let lexicon = tokens(&[
            ("A", Some("red"), None),
            ("D", Some("blue"), None),
            ("G", Some("green"), None),
        ]);
        for _ in 0..20 {
            assert_eq!(TwoValuePolicy.choose(&mut ctx, &lexicon), Attribute::First);
        }
    }

    #[test]
    fn tie_costs_one_flip() {
        let mut ctx = Context::default();
        let lexicon = tokens(&[
            ("I", Some("red"), Some("circle")),
            ("M", Some("blue"), Some("square")),
        ]);
        let mut history = Complexity::new();
        ctx.measure("bias", &mut history, |ctx| {
            TwoValuePolicy.choose(ctx, &lexicon);
            Ok::<_, CogError>(())
        })
        .unwrap();
        assert_eq!(history.last().unwrap().calls("flip"), 1);
    }

    #[test]
    fn fixed_bias_is_free() {
        let mut ctx = Context::default();
        let mut history = Complexity::new();
        let chosen = ctx
            .measure("fixed", &mut history, |ctx| {
                Ok::<_, CogError>(FixedBias(Attribute::Second).choose(ctx, &Lexicon::empty()))
            })
            .unwrap();
        assert_eq!(chosen, Attribute::Second);
        assert_eq!(history.last().unwrap().mdl, 0);
    }
}
