use serde::{Deserialize, Serialize};

/// Data substituted into the booking-confirmation layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingEmailDetails {
    pub package_name: String,
    pub travel_date: String,
    pub travelers: u32,
    pub amount: f64,
    pub booking_id: String,
}

/// The fixed set of outbound templates.
#[derive(Debug, Clone)]
pub enum EmailTemplate {
    Welcome,
    BookingConfirmation(BookingEmailDetails),
    TravelTips,
    Custom {
        subject: Option<String>,
        message: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub subject: &'static str,
}

/// Catalog exposed on the templates endpoint.
pub fn catalog() -> Vec<TemplateInfo> {
    vec![
        TemplateInfo {
            id: "welcome",
            name: "welcome",
            subject: "Welcome to Tarang Travel & Tours! 🏝️",
        },
        TemplateInfo {
            id: "bookingConfirmation",
            name: "booking Confirmation",
            subject: "Your Booking is Confirmed! ✅",
        },
        TemplateInfo {
            id: "travelTips",
            name: "travel Tips",
            subject: "✈️ Essential Travel Tips for Your Journey",
        },
        TemplateInfo {
            id: "custom",
            name: "custom",
            subject: "Custom Subject",
        },
    ]
}

impl EmailTemplate {
    /// Render the subject and HTML body for a recipient. Caller-provided
    /// values are inserted as text, never as markup.
    pub fn render(&self, recipient_name: &str) -> RenderedEmail {
        let name = escape_html(recipient_name);
        match self {
            EmailTemplate::Welcome => RenderedEmail {
                subject: "Welcome to Tarang Travel & Tours! 🏝️".to_string(),
                html: format!(
                    r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
  <div style="background: white; padding: 30px; border-radius: 10px;">
    <h1 style="color: #667eea;">🏝️ Welcome to Tarang Travel!</h1>
    <p style="font-size: 16px; color: #333;">Dear {name},</p>
    <p style="font-size: 16px; color: #333; line-height: 1.6;">Thank you for choosing Tarang Travel &amp; Tours for your next adventure! We're thrilled to have you as part of our travel family.</p>
    <ul style="font-size: 16px; color: #333; line-height: 1.8;">
      <li>✅ Browse our exclusive travel packages</li>
      <li>✈️ Get personalized recommendations</li>
      <li>💰 Enjoy special member discounts</li>
      <li>🌟 Access 24/7 customer support</li>
    </ul>
    <p style="font-size: 16px; color: #333; margin-top: 30px;">Best regards,<br><strong>The Tarang Travel Team</strong></p>
  </div>
</div>"#
                ),
            },
            EmailTemplate::BookingConfirmation(details) => {
                let package = escape_html(&details.package_name);
                let date = escape_html(&details.travel_date);
                let booking_id = escape_html(&details.booking_id);
                RenderedEmail {
                    subject: "Your Booking is Confirmed! ✅".to_string(),
                    html: format!(
                        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
  <div style="background: linear-gradient(135deg, #10b981 0%, #059669 100%); padding: 30px; border-radius: 10px 10px 0 0;">
    <h1 style="color: white; margin: 0;">✅ Booking Confirmed!</h1>
  </div>
  <div style="background: white; padding: 30px; border: 1px solid #e5e7eb; border-top: none; border-radius: 0 0 10px 10px;">
    <p style="font-size: 16px; color: #333;">Dear {name},</p>
    <p style="font-size: 16px; color: #333; line-height: 1.6;">Great news! Your booking has been confirmed. Get ready for an amazing journey!</p>
    <div style="background: #f0fdf4; padding: 20px; border-left: 4px solid #10b981; margin: 20px 0;">
      <h2 style="color: #059669; margin-top: 0;">📋 Booking Details</h2>
      <p style="margin: 10px 0;"><strong>Package:</strong> {package}</p>
      <p style="margin: 10px 0;"><strong>Date:</strong> {date}</p>
      <p style="margin: 10px 0;"><strong>Travelers:</strong> {travelers}</p>
      <p style="margin: 10px 0;"><strong>Total Amount:</strong> ${amount:.2}</p>
      <p style="margin: 10px 0;"><strong>Booking ID:</strong> {booking_id}</p>
    </div>
    <p style="margin-top: 30px; color: #333;">Have questions? Contact us at support@tarangtravel.com</p>
    <p style="margin-top: 20px; color: #333;">Happy travels!<br><strong>Tarang Travel Team</strong></p>
  </div>
</div>"#,
                        travelers = details.travelers,
                        amount = details.amount,
                    ),
                }
            }
            EmailTemplate::TravelTips => RenderedEmail {
                subject: "✈️ Essential Travel Tips for Your Journey".to_string(),
                html: format!(
                    r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
  <div style="background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); padding: 30px; border-radius: 10px 10px 0 0; text-align: center;">
    <h1 style="color: white; margin: 0;">✈️ Travel Tips &amp; Guidance</h1>
  </div>
  <div style="background: white; padding: 30px; border: 1px solid #e5e7eb; border-top: none; border-radius: 0 0 10px 10px;">
    <p style="font-size: 16px; color: #333;">Dear {name},</p>
    <p style="font-size: 16px; color: #333; line-height: 1.6;">Here are some essential tips to make your travel experience smooth and memorable:</p>
    <h3 style="color: #667eea;">📝 Before You Travel</h3>
    <ul style="color: #333; line-height: 1.8;">
      <li>Check passport validity (6 months minimum)</li>
      <li>Purchase travel insurance</li>
      <li>Make copies of important documents</li>
      <li>Notify your bank of travel plans</li>
    </ul>
    <h3 style="color: #667eea;">🎒 Packing Tips</h3>
    <ul style="color: #333; line-height: 1.8;">
      <li>Pack light - less is more!</li>
      <li>Bring essential medications</li>
      <li>Pack a portable charger</li>
    </ul>
    <h3 style="color: #667eea;">🛡️ Safety Tips</h3>
    <ul style="color: #333; line-height: 1.8;">
      <li>Keep valuables in hotel safe</li>
      <li>Use official transportation only</li>
      <li>Share itinerary with someone at home</li>
    </ul>
    <p style="margin-top: 30px; color: #333;">Safe travels and enjoy your adventure!<br><strong>Tarang Travel Team</strong></p>
  </div>
</div>"#
                ),
            },
            EmailTemplate::Custom { subject, message } => {
                let message = escape_html(message);
                RenderedEmail {
                    subject: subject
                        .clone()
                        .unwrap_or_else(|| "Message from Tarang Travel".to_string()),
                    html: format!(
                        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
  <div style="background: white; padding: 30px; border-radius: 10px;">
    <div style="border-bottom: 3px solid #667eea; padding-bottom: 20px; margin-bottom: 20px;">
      <h2 style="color: #667eea; margin: 0;">🏝️ Tarang Travel &amp; Tours</h2>
    </div>
    <p style="font-size: 16px; color: #333;">Dear {name},</p>
    <div style="font-size: 16px; color: #333; line-height: 1.6; margin: 20px 0;">{message}</div>
    <div style="border-top: 1px solid #e5e7eb; padding-top: 20px; margin-top: 30px;">
      <p style="color: #666; font-size: 14px; margin: 5px 0;">Best regards,</p>
      <p style="color: #333; font-size: 16px; margin: 5px 0;"><strong>Tarang Travel Team</strong></p>
      <p style="color: #999; font-size: 12px; margin-top: 20px;">📧 support@tarangtravel.com | 📞 +1-800-TRAVEL | 🌐 www.tarangtravel.com</p>
    </div>
  </div>
</div>"#
                    ),
                }
            }
        }
    }
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
