use super::super::domain::ExampleOutcome;
use super::{Scenario, ScenarioExample, Strategy, Trigger, TriggerOperator, TriggerValue};

fn trigger(
    condition: &'static str,
    operator: TriggerOperator,
    threshold: TriggerValue,
    weight: f64,
) -> Trigger {
    Trigger {
        condition,
        operator,
        threshold,
        weight,
    }
}

pub(super) fn standard_scenarios() -> Vec<Scenario> {
    use TriggerOperator::{Equals, GreaterThan, LessThan};
    use TriggerValue::{Bool, Number};

    vec![
        Scenario {
            id: "vehicle_sale_gap",
            name: "Vehicle sold — period gap",
            description: "The client sold their previous vehicle and went without a policy for a few months, breaking the continuous coverage streak.",
            triggers: vec![
                trigger("has_vehicle_sale", Equals, Bool(true), 0.4),
                trigger("vehicle_sale_verified", Equals, Bool(true), 0.2),
                trigger("actual_value", GreaterThan, Number(24.0), 0.2),
                trigger("actual_value", LessThan, Number(36.0), 0.2),
            ],
            strategies: vec![
                Strategy {
                    approach: "Request a continuity waiver backed by the sale certificate",
                    reasoning: "The interruption is explained by the absence of a vehicle to insure, not by a refusal or cancellation.",
                    success_probability: 85,
                    timeline: "5-10 business days",
                    required_documents: vec![
                        "Certificate of sale (cession)",
                        "Previous insurer termination letter",
                        "Claims history statement (relevé d'information)",
                    ],
                    key_arguments: vec![
                        "No vehicle was owned during the gap, so no insurable risk existed",
                        "Coverage history before the sale was uninterrupted",
                        "Termination was initiated by the client, not the insurer",
                    ],
                },
                Strategy {
                    approach: "Offer a short probation period with standard premium",
                    reasoning: "Insurers that refuse outright waivers often accept a monitored first year.",
                    success_probability: 70,
                    timeline: "10-15 business days",
                    required_documents: vec!["Certificate of sale (cession)"],
                    key_arguments: vec![
                        "Client accepts a monitoring period to demonstrate continued low risk",
                    ],
                },
            ],
            common_arguments: vec![
                "Gap is shorter than the residual requirement horizon",
                "Claims history is portable and verifiable",
            ],
            success_rate: 0.82,
            examples: vec![
                ScenarioExample {
                    situation: "Client sold their hatchback, stayed without a car for four months and returned with 33 months of coverage.",
                    approach: "Continuity waiver with sale certificate",
                    outcome: ExampleOutcome::Approved,
                    conditions: Vec::new(),
                    lessons: vec!["Attach the sale certificate to the first request to avoid a second round-trip"],
                    counterparty: "Atlas Mutuelle",
                    timeline: "6 days",
                },
                ScenarioExample {
                    situation: "Young professional sold a motorbike and bought a car after a seven month gap.",
                    approach: "Probation period with standard premium",
                    outcome: ExampleOutcome::ConditionallyApproved,
                    conditions: vec!["12 month monitoring period", "Deductible raised to 600 EUR"],
                    lessons: vec!["Two-wheel history was only partially credited"],
                    counterparty: "Horizon Assurances",
                    timeline: "12 days",
                },
            ],
        },
        Scenario {
            id: "non_responsible_claims",
            name: "Non-responsible accidents on record",
            description: "Claims on the record were caused by third parties but still count against the claims-history rule.",
            triggers: vec![
                trigger("has_non_responsible_accident", Equals, Bool(true), 0.5),
                trigger("non_responsible_accident_verified", Equals, Bool(true), 0.2),
                trigger("claims_count", LessThan, Number(3.0), 0.3),
            ],
            strategies: vec![Strategy {
                approach: "Request exclusion of non-responsible claims from the count",
                reasoning: "Third-party fault is documented on the accident report and should not weigh on the client's risk profile.",
                success_probability: 78,
                timeline: "7-14 business days",
                required_documents: vec![
                    "Joint accident report (constat amiable)",
                    "Insurer liability determination",
                ],
                key_arguments: vec![
                    "Liability was fully attributed to the third party",
                    "No responsible claim within the reference period",
                ],
            }],
            common_arguments: vec!["Claims frequency reflects exposure, not driving behaviour"],
            success_rate: 0.74,
            examples: vec![ScenarioExample {
                situation: "Driver rear-ended twice at traffic lights; both accident reports assign full liability to the other party.",
                approach: "Exclusion of non-responsible claims",
                outcome: ExampleOutcome::Approved,
                conditions: Vec::new(),
                lessons: vec!["Liability determinations from the previous insurer carried more weight than the reports alone"],
                counterparty: "Atlas Mutuelle",
                timeline: "9 days",
            }],
        },
        Scenario {
            id: "job_loss_interruption",
            name: "Coverage lapse after job loss",
            description: "The policy lapsed for non-payment during a period of unemployment; the client is now back in work.",
            triggers: vec![
                trigger("has_job_loss", Equals, Bool(true), 0.5),
                trigger("job_loss_verified", Equals, Bool(true), 0.2),
                trigger("currently_employed", Equals, Bool(true), 0.3),
            ],
            strategies: vec![Strategy {
                approach: "Present the lapse as a hardship event with restored income",
                reasoning: "Insurers weigh the cause of the lapse; an involuntary job loss followed by re-employment is a recognised hardship pattern.",
                success_probability: 65,
                timeline: "10-20 business days",
                required_documents: vec![
                    "Termination letter from former employer",
                    "Current employment contract",
                    "Three recent payslips",
                ],
                key_arguments: vec![
                    "Lapse was caused by an involuntary loss of income",
                    "Income is restored and documented",
                ],
            }],
            common_arguments: vec!["Direct debit payment reduces renewal default risk"],
            success_rate: 0.61,
            examples: vec![ScenarioExample {
                situation: "Warehouse manager lost their job after a plant closure; policy cancelled for two missed premiums.",
                approach: "Hardship presentation with new employment contract",
                outcome: ExampleOutcome::ConditionallyApproved,
                conditions: vec!["Monthly direct debit mandatory", "8% premium surcharge for the first year"],
                lessons: vec!["Mention the collective nature of the layoff"],
                counterparty: "Horizon Assurances",
                timeline: "15 days",
            }],
        },
        Scenario {
            id: "relocation_abroad",
            name: "Return from relocation abroad",
            description: "The client lived abroad and was insured by a foreign carrier whose history is not automatically recognised.",
            triggers: vec![
                trigger("has_relocation", Equals, Bool(true), 0.5),
                trigger("relocation_verified", Equals, Bool(true), 0.2),
                trigger("actual_value", GreaterThan, Number(0.0), 0.3),
            ],
            strategies: vec![Strategy {
                approach: "Request recognition of the foreign insurance history",
                reasoning: "Foreign claim-free certificates are accepted by most carriers once translated.",
                success_probability: 72,
                timeline: "10-15 business days",
                required_documents: vec![
                    "Foreign insurer claim-free certificate",
                    "Certified translation",
                    "Proof of return (lease or employment)",
                ],
                key_arguments: vec![
                    "Driving history continued abroad without claims",
                    "Gap is administrative rather than behavioural",
                ],
            }],
            common_arguments: vec!["European claim-free statements follow a common format"],
            success_rate: 0.7,
            examples: vec![ScenarioExample {
                situation: "Engineer relocated to Canada for three years and came back with a foreign claim-free certificate.",
                approach: "Recognition of foreign history",
                outcome: ExampleOutcome::Approved,
                conditions: Vec::new(),
                lessons: vec!["Certified translation was required before review started"],
                counterparty: "Nordic Shield",
                timeline: "11 days",
            }],
        },
        Scenario {
            id: "medical_interruption",
            name: "Medical leave without driving",
            description: "A medical condition or long hospital stay kept the client from driving, so the policy was suspended.",
            triggers: vec![
                trigger("has_medical_leave", Equals, Bool(true), 0.5),
                trigger("medical_leave_verified", Equals, Bool(true), 0.25),
                trigger("mitigating_factor_count", GreaterThan, Number(0.0), 0.25),
            ],
            strategies: vec![Strategy {
                approach: "Request a suspension credit for the medical period",
                reasoning: "A suspension for medical reasons does not indicate elevated risk once fitness to drive is certified.",
                success_probability: 75,
                timeline: "7-12 business days",
                required_documents: vec![
                    "Medical certificate covering the period",
                    "Fitness-to-drive certificate",
                ],
                key_arguments: vec![
                    "Interruption was medically required",
                    "Fitness to drive is certified",
                ],
            }],
            common_arguments: vec!["Medical data is shared only with the insurer's medical officer"],
            success_rate: 0.73,
            examples: vec![ScenarioExample {
                situation: "Nurse on extended medical leave after surgery; vehicle stored for eight months.",
                approach: "Suspension credit",
                outcome: ExampleOutcome::Approved,
                conditions: Vec::new(),
                lessons: vec!["Route medical documents through the insurer's medical officer"],
                counterparty: "Nordic Shield",
                timeline: "8 days",
            }],
        },
        Scenario {
            id: "insurer_cancellation_recovery",
            name: "Recovery after insurer cancellation",
            description: "The previous insurer cancelled the policy; the client has since regularised the situation.",
            triggers: vec![
                trigger("has_insurer_cancellation", Equals, Bool(true), 0.5),
                trigger("payment_incidents", LessThan, Number(2.0), 0.3),
                trigger("income_stable", Equals, Bool(true), 0.2),
            ],
            strategies: vec![Strategy {
                approach: "Offer a premium surcharge with annual payment upfront",
                reasoning: "A cancelled client is accepted by specialised carriers when the financial risk is neutralised.",
                success_probability: 55,
                timeline: "15-25 business days",
                required_documents: vec![
                    "Cancellation letter with stated reason",
                    "Proof of settled arrears",
                ],
                key_arguments: vec![
                    "Arrears are fully settled",
                    "Upfront annual payment removes default risk",
                ],
            }],
            common_arguments: vec!["The cancellation reason was financial, not claims-related"],
            success_rate: 0.48,
            examples: vec![ScenarioExample {
                situation: "Policy cancelled by the insurer for unpaid premiums during a divorce; arrears settled six months later.",
                approach: "Surcharge with upfront payment",
                outcome: ExampleOutcome::ConditionallyApproved,
                conditions: vec!["Annual premium paid upfront", "15% surcharge"],
                lessons: vec!["Specialised carriers answered faster than mainstream ones"],
                counterparty: "Solidaris Risk",
                timeline: "21 days",
            }],
        },
    ]
}
