pub fn render_welcome(name: &str, activation_token: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2>Welcome to Formsink</h2>
    <p>Hi {name},</p>
    <p>Your account has been created. Activate it by sending a
    <code>PUT /v1/users/activated</code> request with the token below:</p>
    <pre style="background: #f4f4f4; padding: 10px; border-radius: 4px;">{activation_token}</pre>
    <p style="color: #666; font-size: 14px;">The token expires in 12 hours. If you didn't expect this email, you can ignore it.</p>
</body>
</html>"#
    )
}

pub fn render_password_reset(reset_token: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2>Password Reset</h2>
    <p>A password reset was requested for your Formsink account. Send a
    <code>PUT /v1/users/password</code> request with your new password and the token below:</p>
    <pre style="background: #f4f4f4; padding: 10px; border-radius: 4px;">{reset_token}</pre>
    <p style="color: #666; font-size: 14px;">The token expires in 45 minutes. If you didn't request this, you can ignore it.</p>
</body>
</html>"#
    )
}
