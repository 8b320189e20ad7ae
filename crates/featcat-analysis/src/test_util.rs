use featcat_catalog::Feature;

pub(crate) fn feature(id: u64, geo: &str, primary_category: &str) -> Feature {
    Feature {
        id,
        geo: geo.into(),
        primary_category: primary_category.into(),
        ..Feature::default()
    }
}

pub(crate) fn tagged(
    id: u64,
    (geo, product, model): (&str, &str, &str),
    (category, feature_type, subtype, l3): (&str, &str, &str, &str),
) -> Feature {
    Feature {
        id,
        geo: geo.into(),
        product_business: product.into(),
        model_name: model.into(),
        primary_category: category.into(),
        feature_type: feature_type.into(),
        feature_subtype: subtype.into(),
        feature_l3: l3.into(),
        ..Feature::default()
    }
}

/// The three-record walkthrough dataset.
pub(crate) fn scenario() -> Vec<Feature> {
    vec![
        Feature {
            id: 1,
            geo: "US".into(),
            primary_category: "Bureau".into(),
            feature_type: "Credit/Loan History".into(),
            shap_rank: Some(5.0),
            top_20_50: "Top 20".into(),
            ..Feature::default()
        },
        Feature {
            id: 2,
            geo: "US".into(),
            primary_category: "Cash Flow".into(),
            shap_rank: Some(30.0),
            ..Feature::default()
        },
        Feature {
            id: 3,
            geo: "PH".into(),
            primary_category: "Bureau".into(),
            ..Feature::default()
        },
    ]
}

/// A fuller dataset where every record has geo, product, model and category.
pub(crate) fn portfolio() -> Vec<Feature> {
    let rows = [
        (("US", "Cash Advance", "Boron"), ("Cash Flow", "Income", "Payroll", "Direct Deposit")),
        (("US", "Cash Advance", "Boron"), ("Cash Flow", "Income", "Payroll", "")),
        (("US", "Cash Advance", "Boron"), ("Cash Flow", "Spending", "", "")),
        (("US", "Cash Advance", "Beryllium"), ("Bureau", "Credit/Loan History", "Payment Behavior", "")),
        (("US", "Thrive", "Taurus"), ("Bureau", "Credit/Loan History", "Repayment Metrics", "Late Payments")),
        (("US", "Thrive", "Taurus"), ("Device Data", "App Ecosystem", "", "")),
        (("PH", "Cashloan", "Cebu"), ("Device Data", "SMS", "Inquiries", "")),
        (("PH", "Cashloan", "Davao"), ("Loan Activity", "Loan Application", "Application Counts", "")),
        (("PH", "Cashloan", "Davao"), ("Loan Activity", "Credit/Loan History", "Collections, Recoveries, Repayments", "")),
        (("MX", "Bullet Loans", "Durango"), ("User-Reported Data", "Questionnaire", "", "")),
        (("MX", "Bullet Loans", "Durango"), ("Platform Data", "User Engagement", "", "")),
        (("India", "Term Loans", "V3-Fresh"), ("Bureau", "KYC/Identity", "", "")),
    ];
    rows.into_iter()
        .zip(1..)
        .map(|((scope, taxonomy), id)| tagged(id, scope, taxonomy))
        .collect()
}
