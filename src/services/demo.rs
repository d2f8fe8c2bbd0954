//! Demo data loaded at startup in development.

use tracing::info;

use crate::error::AppResult;
use crate::models::{CreateProjectRequest, Credentials, NewTestCase, ProjectType};
use crate::services::ProjectStore;

fn case(tracking_ref: &str, name: &str, steps: &str, expected: &str) -> NewTestCase {
    NewTestCase {
        tracking_ref: tracking_ref.to_string(),
        steps: steps.to_string(),
        expected_result: expected.to_string(),
        ..NewTestCase::named(name)
    }
}

/// Create two sample projects with a handful of test cases each.
pub async fn seed_demo_projects(store: &ProjectStore) -> AppResult<()> {
    let shop = store
        .create_project(CreateProjectRequest {
            name: "E-commerce Website".to_string(),
            description: "Storefront regression suite".to_string(),
            project_type: ProjectType::Web,
            credentials: Credentials {
                username: "qa_user".to_string(),
                password: "demo-password".to_string(),
                sms_otp_contact: String::new(),
                login_guide: "Use the staging storefront login page.".to_string(),
            },
            files: vec![],
            test_cases: vec![],
        })
        .await;

    for tc in [
        case(
            "SHOP-101",
            "Login with valid credentials",
            "1. Open login page\n2. Enter username and password\n3. Submit",
            "User lands on the account dashboard",
        ),
        case(
            "SHOP-102",
            "Add item to cart",
            "1. Open any product\n2. Click 'Add to cart'",
            "Cart badge shows one item",
        ),
        case(
            "SHOP-103",
            "Checkout with saved card",
            "1. Open cart\n2. Click checkout\n3. Pay with saved card",
            "Order confirmation page is shown",
        ),
    ] {
        store.add_test_case(&shop.id, tc).await?;
    }

    let bank = store
        .create_project(CreateProjectRequest {
            name: "Mobile Banking App".to_string(),
            description: "Smoke tests for the Android and iOS apps".to_string(),
            project_type: ProjectType::Mobile,
            credentials: Credentials {
                username: "0900000000".to_string(),
                password: "demo-password".to_string(),
                sms_otp_contact: "0900000000".to_string(),
                login_guide: "OTP is delivered by SMS to the test phone.".to_string(),
            },
            files: vec![],
            test_cases: vec![],
        })
        .await;

    for tc in [
        case(
            "BANK-11",
            "Login with OTP",
            "1. Enter phone number\n2. Enter OTP",
            "Home screen shows account balance",
        ),
        case(
            "BANK-12",
            "Internal transfer",
            "1. Open transfers\n2. Send 10,000 to own savings account",
            "Both balances are updated",
        ),
    ] {
        store.add_test_case(&bank.id, tc).await?;
    }

    info!("Seeded demo projects");
    Ok(())
}
