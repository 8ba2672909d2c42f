//! Static shape rules for declared native-call signatures.
//!
//! Marshaling only works for shapes whose native width is unambiguous.
//! Two combinations are rejected: parameterized (generic) types, unless
//! they derive from the platform's delegate abstraction (delegates are
//! invoked, not marshaled as data), and enumerated types marked with a
//! native pointer-width representation, whose runtime width differs across
//! the boundary.
//!
//! Validation never stops early inside a declaration: every slot is
//! inspected so one pass reports every violation.

use crate::declaration::{Declaration, TypeShape};
use crate::report::Report;

/// Validate the return slot and every parameter slot of a declaration.
///
/// Returns `true` when no violation was recorded. Each violation appends
/// one formatted line to the report naming the declaring type, the method,
/// the offending shape, and the slot.
pub fn check_declaration(decl: &Declaration, report: &mut Report) -> bool {
    let mut ok = check_slot(decl, "return", &decl.return_type, report);
    for param in &decl.params {
        // No short-circuit: every slot gets inspected.
        let slot_ok = check_slot(decl, &param.name, &param.shape, report);
        ok &= slot_ok;
    }
    ok
}

fn check_slot(decl: &Declaration, slot: &str, shape: &TypeShape, report: &mut Report) -> bool {
    // `ref` is fine but it can hide the shapes we're looking for.
    let shape = shape.strip_by_ref();
    let mut ok = true;

    if let TypeShape::Generic { delegate, .. } = shape {
        if !delegate {
            report.add_error_line(format!(
                "[FAIL] {}.{} has a generic parameter in its signature: {shape} {slot}",
                decl.owning_type, decl.method
            ));
            ok = false;
        }
    }

    if let TypeShape::Enum { native: true, .. } = shape {
        report.add_error_line(format!(
            "[FAIL] {}.{} has a native-width enum parameter in its signature: {shape} {slot}",
            decl.owning_type, decl.method
        ));
        ok = false;
    }

    ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CheckKind;

    fn report() -> Report {
        Report::new(CheckKind::Signatures)
    }

    fn base() -> Declaration {
        Declaration::new("GameController.GCController", "GCControllerSetIndex", "__Internal")
    }

    #[test]
    fn test_plain_signature_passes() {
        let decl = base()
            .with_return(TypeShape::scalar("i32"))
            .with_param("handle", TypeShape::Pointer { name: "GCController".into() })
            .with_param("index", TypeShape::scalar("nint"));
        let mut report = report();
        assert!(check_declaration(&decl, &mut report));
        assert_eq!(report.errors(), 0);
    }

    #[test]
    fn test_generic_parameter_rejected() {
        let decl = base().with_param(
            "completion",
            TypeShape::Generic {
                name: "NSDictionary<NSString>".into(),
                delegate: false,
            },
        );
        let mut report = report();
        assert!(!check_declaration(&decl, &mut report));
        assert_eq!(report.errors(), 1);
        let line = &report.lines()[0];
        assert!(line.contains("GameController.GCController"));
        assert!(line.contains("GCControllerSetIndex"));
        assert!(line.contains("NSDictionary<NSString>"));
        assert!(line.contains("completion"));
    }

    #[test]
    fn test_delegate_generic_is_exempt() {
        // A delegate-derived generic, even behind a by-ref, is fine.
        let decl = base().with_param(
            "callback",
            TypeShape::by_ref(TypeShape::Generic {
                name: "GenericBox<Action>".into(),
                delegate: true,
            }),
        );
        let mut report = report();
        assert!(check_declaration(&decl, &mut report));
        assert_eq!(report.errors(), 0);
    }

    #[test]
    fn test_by_ref_generic_reports_exactly_one_violation() {
        let decl = base().with_param(
            "values",
            TypeShape::by_ref(TypeShape::Generic {
                name: "NSArray<GCControllerElement>".into(),
                delegate: false,
            }),
        );
        let mut report = report();
        assert!(!check_declaration(&decl, &mut report));
        assert_eq!(report.errors(), 1);
    }

    #[test]
    fn test_native_enum_parameter_rejected() {
        let decl = base().with_param(
            "playerIndex",
            TypeShape::Enum {
                name: "GCControllerPlayerIndex".into(),
                native: true,
            },
        );
        let mut report = report();
        assert!(!check_declaration(&decl, &mut report));
        assert_eq!(report.errors(), 1);
        assert!(report.lines()[0].contains("native-width enum"));
    }

    #[test]
    fn test_default_width_enum_is_fine() {
        let decl = base().with_param(
            "buttonType",
            TypeShape::Enum {
                name: "WKAlertActionStyle".into(),
                native: false,
            },
        );
        let mut report = report();
        assert!(check_declaration(&decl, &mut report));
        assert_eq!(report.errors(), 0);
    }

    #[test]
    fn test_native_enum_violation_independent_of_other_params() {
        let decl = base()
            .with_param("first", TypeShape::scalar("f64"))
            .with_param(
                "style",
                TypeShape::Enum {
                    name: "GCControllerPlayerIndex".into(),
                    native: true,
                },
            )
            .with_param("last", TypeShape::scalar("u8"));
        let mut report = report();
        assert!(!check_declaration(&decl, &mut report));
        assert_eq!(report.errors(), 1);
    }

    #[test]
    fn test_all_slots_inspected_no_early_exit() {
        let decl = base()
            .with_return(TypeShape::Generic {
                name: "NSArray<NSString>".into(),
                delegate: false,
            })
            .with_param(
                "a",
                TypeShape::Generic {
                    name: "NSSet<NSNumber>".into(),
                    delegate: false,
                },
            )
            .with_param(
                "b",
                TypeShape::Enum {
                    name: "GCMicroGamepadElement".into(),
                    native: true,
                },
            );
        let mut report = report();
        assert!(!check_declaration(&decl, &mut report));
        assert_eq!(report.errors(), 3);
        assert_eq!(report.lines().len(), 3);
    }

    #[test]
    fn test_return_slot_named_in_diagnostic() {
        let decl = base().with_return(TypeShape::Generic {
            name: "NSArray<NSString>".into(),
            delegate: false,
        });
        let mut report = report();
        check_declaration(&decl, &mut report);
        assert!(report.lines()[0].ends_with("return"));
    }

    #[test]
    fn test_nested_by_ref_only_stripped_one_level() {
        // A doubly wrapped generic stays hidden: only one ref level comes off.
        let decl = base().with_param(
            "nested",
            TypeShape::by_ref(TypeShape::by_ref(TypeShape::Generic {
                name: "NSArray<NSString>".into(),
                delegate: false,
            })),
        );
        let mut report = report();
        assert!(check_declaration(&decl, &mut report));
        assert_eq!(report.errors(), 0);
    }
}
