//! Vendor account commands.

use anyhow::{bail, Result};
use bazaar_auth::{unmet_password_requirements, AuthError, RegistrationForm, SignInForm, Vendor};
use bazaar_catalog::catalog::VendorSummary;
use bazaar_catalog::FieldErrors;

use super::{VendorArgs, VendorCommand};
use crate::context::Context;

/// Run the vendor command.
pub async fn run(args: VendorArgs, ctx: &Context) -> Result<()> {
    match args.command {
        VendorCommand::Register {
            business_name,
            email,
            password,
            contact_person,
            phone,
            address,
        } => {
            let form = RegistrationForm {
                business_name,
                email,
                password,
                contact_person,
                phone,
                address,
            };
            register(form, ctx).await
        }
        VendorCommand::SignIn { email, password } => {
            sign_in(SignInForm::new(email, password), ctx).await
        }
        VendorCommand::SignOut => sign_out(ctx).await,
        VendorCommand::Whoami => whoami(ctx).await,
    }
}

async fn register(form: RegistrationForm, ctx: &Context) -> Result<()> {
    let candidate = match form.validate() {
        Ok(candidate) => candidate,
        Err(errors) => {
            if errors.contains("password") && !form.password.is_empty() {
                for missing in unmet_password_requirements(&form.password) {
                    ctx.output.debug(&format!("Password needs: {}", missing));
                }
            }
            return rejected(errors, ctx);
        }
    };

    let mut credentials = ctx.credentials()?;
    match credentials.register(candidate) {
        Ok(vendor) => {
            ctx.output.success(&format!("Welcome, {}!", vendor.business_name));
            show_vendor(&vendor, ctx);
            Ok(())
        }
        Err(e) => surface(e, ctx),
    }
}

async fn sign_in(form: SignInForm, ctx: &Context) -> Result<()> {
    if let Err(errors) = form.validate() {
        return rejected(errors, ctx);
    }

    let mut credentials = ctx.credentials()?;
    match credentials.authenticate(&form.email, &form.password) {
        Ok(vendor) => {
            ctx.output
                .success(&format!("Signed in as {}", vendor.business_name));
            if ctx.output.is_json() {
                ctx.output.json(&vendor);
            }
            Ok(())
        }
        Err(e) => surface(e, ctx),
    }
}

async fn sign_out(ctx: &Context) -> Result<()> {
    let mut credentials = ctx.credentials()?;
    let was_signed_in = credentials.is_authenticated();
    credentials.sign_out()?;

    if was_signed_in {
        ctx.output.success("Signed out");
    } else {
        ctx.output.info("No active session");
    }
    Ok(())
}

async fn whoami(ctx: &Context) -> Result<()> {
    let credentials = ctx.credentials()?;
    let Some(vendor) = credentials.current_vendor() else {
        ctx.output.info("Not signed in");
        return Ok(());
    };

    let summary = ctx.catalog()?.summary_for(&vendor.id);
    if ctx.output.is_json() {
        ctx.output.json(&profile_json(vendor, &summary));
        return Ok(());
    }
    show_vendor(vendor, ctx);
    ctx.output.kv("Products", &summary.total.to_string());
    ctx.output.kv("In stock", &summary.in_stock.to_string());
    ctx.output.kv("Out of stock", &summary.out_of_stock.to_string());
    Ok(())
}

/// `whoami --json` body: the session vendor plus their listing counts.
fn profile_json(vendor: &Vendor, summary: &VendorSummary) -> serde_json::Value {
    serde_json::json!({ "vendor": vendor, "summary": summary })
}

fn show_vendor(vendor: &Vendor, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(vendor);
        return;
    }
    ctx.output.header(&vendor.business_name);
    ctx.output.kv("ID", vendor.id.as_str());
    ctx.output.kv("Email", &vendor.email);
    ctx.output.kv("Contact", &vendor.contact_person);
    ctx.output.kv("Phone", &vendor.phone);
    ctx.output.kv("Address", &vendor.address);
    ctx.output
        .kv("Member since", &vendor.created_at.format("%Y-%m-%d").to_string());
}

/// Print field errors and fail the command.
pub(crate) fn rejected(errors: FieldErrors, ctx: &Context) -> Result<()> {
    ctx.output.field_errors(&errors);
    bail!("Please fix the errors above")
}

fn surface(err: AuthError, ctx: &Context) -> Result<()> {
    match err.field_errors() {
        Some(errors) => rejected(errors, ctx),
        None => Err(err.into()),
    }
}
