//! Keyword-routed farming assistant replies, used when no LLM answers.

/// Routes are tried in order; the first route with a keyword contained in the
/// lowercased message wins.
static ROUTES: &[(&[&str], Reply)] = &[
    (&["crop", "plant", "grow", "cultivate"], Reply::Crops),
    (&["climate", "weather", "drought", "flood", "rain"], Reply::Fixed(CLIMATE)),
    (&["scheme", "subsidy", "government", "loan", "support"], Reply::Fixed(SCHEMES)),
    (&["market", "price", "sell", "msp", "buyer"], Reply::Fixed(MARKET)),
    (&["water", "irrigation", "drip", "sprinkler"], Reply::Fixed(WATER)),
    (&["soil", "fertilizer", "manure", "compost"], Reply::Fixed(SOIL)),
    (&["pest", "disease", "insect", "spray"], Reply::Fixed(PESTS)),
    (&["help", "advice", "guide", "start"], Reply::Fixed(HELP)),
];

#[derive(Clone, Copy)]
enum Reply {
    /// Mentions the farmer's location.
    Crops,
    Fixed(&'static str),
}

/// Reply to a chat message. `location` and `farm_size` come from the optional
/// request context.
pub fn reply(message: &str, location: Option<&str>, farm_size: Option<&str>) -> String {
    let message = message.to_lowercase();
    let location = location.filter(|l| !l.is_empty());

    let route = ROUTES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| message.contains(k)));

    match route.map(|(_, r)| *r) {
        Some(Reply::Crops) => crops_reply(location.unwrap_or("your region")),
        Some(Reply::Fixed(text)) => text.to_string(),
        None => default_reply(&message, location, farm_size.filter(|s| !s.is_empty())),
    }
}

fn crops_reply(location: &str) -> String {
    format!(
        "🌾 **Climate-Resilient Crop Recommendations for {location}:**

**Top 3 Crops:**
1. **Millets** - Extremely drought-resistant, requires 70% less water than rice
2. **Cotton** - Heat-tolerant, suitable for black soil, high market value
3. **Soybean** - Nitrogen-fixing, improves soil health, good rotation crop

**Why These Crops?**
- Adapted to irregular rainfall patterns
- Lower water requirements
- Higher climate resilience
- Good market demand

Would you like detailed cultivation practices for any specific crop?"
    )
}

fn default_reply(message: &str, location: Option<&str>, farm_size: Option<&str>) -> String {
    let context = match (location, farm_size) {
        (Some(loc), Some(size)) => format!(
            "\n\nI see you're from {loc} with {size} acres of land. Let me provide location-specific guidance."
        ),
        (Some(loc), None) => {
            format!("\n\nI see you're from {loc}. Let me provide location-specific guidance.")
        }
        _ => String::new(),
    };

    format!(
        "🤖 I understand you're asking about: \"{message}\"

As your AI farming assistant, I specialize in:

• **Climate Adaptation** - Strategies for changing weather patterns
• **Crop Selection** - Best crops for your soil and climate
• **Government Schemes** - Subsidies and financial support
• **Water Management** - Irrigation and conservation
• **Market Intelligence** - Prices and selling strategies
• **Soil Health** - Fertilization and organic farming

{context}

Could you be more specific? For example:
- \"What crops are best for drought conditions?\"
- \"How do I apply for irrigation subsidy?\"
- \"What's the current market price for cotton?\"
- \"How can I improve my soil health?\"

Or fill the form above for a complete AI-powered farm analysis!"
    )
}

const CLIMATE: &str = "🌡️ **Climate Adaptation Strategies:**

**Immediate Actions (0-3 months):**
• Install drip irrigation system (75% govt subsidy available)
• Start rainwater harvesting
• Get soil health card (free)
• Plant drought-resistant varieties

**Medium-term (3-12 months):**
• Build farm ponds for water storage
• Implement mulching techniques
• Diversify crop portfolio
• Join weather advisory services

**Long-term (1-3 years):**
• Establish perennial crops
• Create windbreaks and shelter belts
• Invest in climate-smart infrastructure

**Government Support:** Up to ₹2 lakh subsidy available through PMKSY and NMSA schemes.";

const SCHEMES: &str = "🏛️ **Top Government Schemes for Farmers (2024):**

**1. PM-KISAN**
- ₹6,000/year direct benefit transfer
- All landholding farmers eligible
- Apply: pmkisan.gov.in

**2. PMKSY (Irrigation)**
- 75% subsidy on drip/sprinkler systems
- Up to ₹2 lakh per farmer
- Saves 60% water

**3. Soil Health Management**
- Free soil testing
- ₹15,000 subsidy for soil improvement
- Increases yield by 20-30%

**4. Kisan Credit Card (KCC)**
- Loans up to ₹3 lakh at 7% interest
- 3% interest subvention
- Easy repayment terms

**5. PMFBY (Crop Insurance)**
- 95% premium subsidy
- Covers natural calamities
- Protects your investment

**How to Apply:** Visit nearest Krishi Vigyan Kendra or apply online at respective portals.";

const MARKET: &str = "📈 **Market Intelligence & Selling Strategies:**

**Current Market Trends:**
• Cotton: ₹55/kg (increasing trend)
• Soybean: ₹45/kg (stable)
• Wheat: ₹20/kg (MSP protected)
• Rice: ₹22/kg (high demand)

**Best Selling Strategies:**
1. **e-NAM Platform** - Get better prices, transparent bidding
2. **FPO Membership** - Collective bargaining power
3. **Contract Farming** - Price stability, assured market
4. **Direct Marketing** - Higher margins, customer relationships

**Timing Tips:**
• Avoid harvest season glut
• Store for 2-3 months if possible
• Monitor daily mandi rates
• Use cold storage for perishables

**Value Addition:**
• Grading & sorting: +15% price
• Organic certification: +30% premium
• Processing: +50% value

Need specific crop market analysis?";

const WATER: &str = "💧 **Smart Water Management Solutions:**

**Drip Irrigation Benefits:**
• Save 60% water compared to flood irrigation
• Increase yield by 40-50%
• Reduce fertilizer use by 30%
• 75% government subsidy available

**Cost Analysis (1 acre):**
- Total Cost: ₹60,000
- Government Subsidy: ₹45,000
- Your Investment: ₹15,000
- Payback Period: 1.5 years

**Rainwater Harvesting:**
• Capture monsoon water
• Recharge groundwater
• Free technical support from govt
• Can save ₹20,000/year on irrigation

**Water-Saving Techniques:**
1. Mulching - reduces evaporation by 50%
2. Alternate wetting & drying for rice
3. Laser land leveling - saves 25% water
4. Crop scheduling based on water availability

**Apply for PMKSY subsidy today!**";

const SOIL: &str = "🌱 **Soil Health Management Guide:**

**Get Your Soil Health Card:**
• Free soil testing at Krishi Vigyan Kendra
• Know exact NPK requirements
• Save 20% on fertilizer costs
• Increase yield by 15-25%

**Organic Matter Management:**
• Add 5 tons compost/acre annually
• Practice green manuring
• Use crop residues wisely
• Maintain 2-3% organic carbon

**Balanced Fertilization:**
• Follow soil test recommendations
• Use bio-fertilizers (Rhizobium, Azotobacter)
• Apply micro-nutrients (Zinc, Boron)
• Avoid excessive urea

**Soil Conservation:**
• Contour farming on slopes
• Crop rotation (legumes + cereals)
• Cover crops in off-season
• Minimum tillage practices

**Government Support:**
₹15,000 subsidy under Soil Health Management Scheme";

const PESTS: &str = "🐛 **Integrated Pest Management (IPM):**

**Prevention First:**
• Use resistant varieties
• Proper crop rotation
• Maintain field hygiene
• Balanced fertilization

**Monitoring:**
• Install pheromone traps
• Regular field scouting
• Use yellow sticky traps
• Monitor weather for disease outbreak

**Biological Control:**
• Neem-based pesticides
• Trichoderma for soil diseases
• NPV for caterpillar control
• Encourage natural predators

**Chemical Control (Last Resort):**
• Use only when threshold crossed
• Follow recommended doses
• Rotate pesticide groups
• Observe safety periods

**Cost Savings:**
IPM reduces pesticide costs by 60% while maintaining yields!";

const HELP: &str = "🤖 **GRA - Your AI Farming Assistant**

I can help you with:

✅ **Climate Adaptation**
- Risk assessment
- Resilient crop selection
- Weather-based advisories

✅ **Crop Management**
- Variety selection
- Cultivation practices
- Pest & disease control

✅ **Financial Planning**
- Government schemes
- Subsidy applications
- Cost-benefit analysis

✅ **Market Intelligence**
- Price trends
- Selling strategies
- Value addition

✅ **Resource Management**
- Water conservation
- Soil health
- Input optimization

**Quick Actions:**
1. Fill the form above for complete farm analysis
2. Ask me specific questions
3. Get personalized recommendations

What would you like to know more about?";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_route_uses_location() {
        let r = reply("Which CROP should I plant?", Some("Nagpur"), None);
        assert!(r.contains("Recommendations for Nagpur"));
        let r = reply("what to grow", None, None);
        assert!(r.contains("Recommendations for your region"));
    }

    #[test]
    fn test_route_order() {
        // "rain" (climate) wins over "water" because climate is checked first
        assert_eq!(reply("rain water", None, None), CLIMATE);
        assert_eq!(reply("loan for drip", None, None), SCHEMES);
        assert_eq!(reply("msp today", None, None), MARKET);
        assert_eq!(reply("sprinkler", None, None), WATER);
        assert_eq!(reply("compost", None, None), SOIL);
        assert_eq!(reply("insect attack", None, None), PESTS);
        assert_eq!(reply("need advice", None, None), HELP);
    }

    #[test]
    fn test_default_reply_with_context() {
        let r = reply("Hello there", Some("Pune"), Some("5"));
        assert!(r.contains("asking about: \"hello there\""));
        assert!(r.contains("I see you're from Pune with 5 acres of land."));

        let r = reply("hello", Some("Pune"), None);
        assert!(r.contains("I see you're from Pune. Let me"));

        let r = reply("hello", None, Some("5"));
        assert!(!r.contains("I see you're from"));
    }
}
